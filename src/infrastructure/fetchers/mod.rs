use crate::config::cli::{AnalyzeArgs, FetcherKind};
use crate::config::http_client;
use crate::domain::{Document, ReelTarget};
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use tracing::info;

#[cfg(feature = "browser")]
pub(crate) mod browser;
pub(crate) mod http;
pub(crate) mod session;

/// Retrieves the document for one reel.
#[async_trait]
pub trait ReelFetcher: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, target: &ReelTarget) -> Result<Document>;
}

/// Builds the fetcher selected on the command line.
pub async fn build_fetcher(args: &AnalyzeArgs) -> Result<Box<dyn ReelFetcher>> {
    let fetcher: Box<dyn ReelFetcher> = match args.fetcher {
        FetcherKind::Http => Box::new(http::HttpFetcher::new(
            http_client(args.timeout_secs)?,
            &args.base_url,
        )),
        FetcherKind::Session => {
            let session_id = args.session_id.clone().ok_or_else(|| {
                ReelError::Config("the session fetcher needs --session-id or IG_SESSION_ID".into())
            })?;
            let context = session::SessionContext::new(session_id, args.csrf_token.clone());
            Box::new(session::SessionFetcher::new(
                http_client(args.timeout_secs)?,
                &args.base_url,
                context,
            ))
        }
        FetcherKind::Browser => browser_fetcher(args).await?,
    };

    info!("Using {} fetcher", fetcher.name());
    Ok(fetcher)
}

#[cfg(feature = "browser")]
async fn browser_fetcher(args: &AnalyzeArgs) -> Result<Box<dyn ReelFetcher>> {
    let fetcher = browser::BrowserFetcher::launch(&args.base_url, args.timeout_secs).await?;
    Ok(Box::new(fetcher))
}

#[cfg(not(feature = "browser"))]
async fn browser_fetcher(_args: &AnalyzeArgs) -> Result<Box<dyn ReelFetcher>> {
    Err(ReelError::Config(
        "browser fetching requires building with the `browser` feature".into(),
    ))
}

/// Joins a base URL and a path without doubling the slash.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(
            join_url("https://www.instagram.com/", "/reel/ABC/"),
            "https://www.instagram.com/reel/ABC/"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8080", "p/ABC/"),
            "http://127.0.0.1:8080/p/ABC/"
        );
    }
}
