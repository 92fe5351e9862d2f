use super::{join_url, ReelFetcher};
use crate::domain::{Document, ReelTarget};
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::Client;
use tracing::debug;

const APP_ID_HEADER: &str = "X-IG-App-ID";
const WEB_APP_ID: &str = "936619743392459";

/// Credentials of a logged-in browser session, owned for one analysis run.
#[derive(Clone)]
pub struct SessionContext {
    session_id: String,
    csrf_token: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: String, csrf_token: Option<String>) -> Self {
        Self {
            session_id,
            csrf_token,
        }
    }

    pub fn cookie_header(&self) -> String {
        match &self.csrf_token {
            Some(token) => format!("sessionid={}; csrftoken={}", self.session_id, token),
            None => format!("sessionid={}", self.session_id),
        }
    }
}

// keep the secret out of debug logs
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session_id", &"<redacted>")
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Authenticated request for the media JSON of a reel.
pub struct SessionFetcher {
    client: Client,
    base_url: String,
    context: SessionContext,
}

impl SessionFetcher {
    pub fn new(client: Client, base_url: &str, context: SessionContext) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            context,
        }
    }

    pub fn media_url(&self, shortcode: &str) -> String {
        join_url(&self.base_url, &format!("p/{shortcode}/?__a=1&__d=dis"))
    }
}

#[async_trait]
impl ReelFetcher for SessionFetcher {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn fetch(&self, target: &ReelTarget) -> Result<Document> {
        let url = self.media_url(&target.shortcode);
        debug!("GET {url} with session cookie");

        let response = self
            .client
            .get(&url)
            .header(COOKIE, self.context.cookie_header())
            .header(APP_ID_HEADER, WEB_APP_ID)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReelError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        // login walls come back as HTML and still go through extraction
        Ok(Document::from_body(response.text().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_includes_csrf_when_present() {
        let bare = SessionContext::new("sid".into(), None);
        assert_eq!(bare.cookie_header(), "sessionid=sid");

        let full = SessionContext::new("sid".into(), Some("tok".into()));
        assert_eq!(full.cookie_header(), "sessionid=sid; csrftoken=tok");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let ctx = SessionContext::new("super-secret".into(), Some("tok".into()));
        let rendered = format!("{ctx:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("\"tok\""));
    }
}
