use super::{join_url, ReelFetcher};
use crate::domain::{Document, ReelTarget};
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Anonymous GET of the public reel page.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub fn page_url(&self, shortcode: &str) -> String {
        join_url(&self.base_url, &format!("reel/{shortcode}/"))
    }
}

#[async_trait]
impl ReelFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, target: &ReelTarget) -> Result<Document> {
        let url = self.page_url(&target.shortcode);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReelError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(Document::Html(response.text().await?))
    }
}
