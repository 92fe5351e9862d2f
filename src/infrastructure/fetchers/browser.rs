use super::{join_url, ReelFetcher};
use crate::domain::{Document, ReelTarget};
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Renders reel pages in a headless Chromium owned by this fetcher.
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    base_url: String,
}

impl BrowserFetcher {
    pub async fn launch(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let config = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(timeout_secs))
            .args(vec![
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
            ])
            .build()
            .map_err(ReelError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ReelError::Browser(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
            warn!("Browser event handler exited");
        });

        info!("Launched headless Chromium");
        Ok(Self {
            browser,
            handler,
            base_url: base_url.to_string(),
        })
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl ReelFetcher for BrowserFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch(&self, target: &ReelTarget) -> Result<Document> {
        let url = join_url(&self.base_url, &format!("reel/{}/", target.shortcode));
        debug!("Rendering {url}");

        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| ReelError::Browser(e.to_string()))?;

        let content = match page.wait_for_navigation().await {
            Ok(page) => page.content().await,
            Err(e) => Err(e),
        };

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {url}: {e}");
        }

        content
            .map(Document::Html)
            .map_err(|e| ReelError::Browser(e.to_string()))
    }
}
