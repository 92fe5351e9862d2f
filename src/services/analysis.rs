use crate::domain::{BatchResult, ReelMetric, ReelTarget};
use crate::infrastructure::ReelFetcher;
use crate::services::extraction::FieldExtractor;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Runs the fetcher and extractor over a list of URLs, one at a time.
pub struct BatchAnalyzer {
    fetcher: Box<dyn ReelFetcher>,
    extractor: FieldExtractor,
    delay: Duration,
    show_progress: bool,
}

impl BatchAnalyzer {
    pub fn new(fetcher: Box<dyn ReelFetcher>) -> Self {
        info!("Created batch analyzer with {} fetcher", fetcher.name());
        Self {
            fetcher,
            extractor: FieldExtractor::new(),
            delay: Duration::ZERO,
            show_progress: false,
        }
    }

    /// Pause between consecutive fetches.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Analyzes every URL in order. Per-URL failures are recorded on the
    /// entry and never stop the batch.
    pub async fn analyze(&self, urls: &[String]) -> BatchResult {
        let progress = self.progress_bar(urls.len());
        let mut entries = Vec::with_capacity(urls.len());
        let mut fetched_any = false;

        for url in urls {
            progress.set_message(url.clone());

            let entry = match ReelTarget::from_url(url) {
                None => {
                    warn!("Invalid reel URL: {url}");
                    ReelMetric::invalid(url)
                }
                Some(target) => {
                    if fetched_any && !self.delay.is_zero() {
                        sleep(self.delay).await;
                    }
                    fetched_any = true;
                    self.analyze_target(&target).await
                }
            };

            entries.push(entry);
            progress.inc(1);
        }

        progress.finish_and_clear();
        BatchResult::new(entries)
    }

    async fn analyze_target(&self, target: &ReelTarget) -> ReelMetric {
        match self.fetcher.fetch(target).await {
            Ok(document) => {
                let fields = self.extractor.extract(&document);
                if !fields.has_metrics() {
                    info!("No metrics found for {}", target.url);
                }
                info!(
                    "Analyzed {} ({} likes, {} views)",
                    target.shortcode, fields.likes_count, fields.views_count
                );
                ReelMetric::success(target, fields)
            }
            Err(e) => {
                warn!("Failed to fetch {}: {e}", target.url);
                ReelMetric::failed(target, e.to_string())
            }
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            pb.set_style(style);
        }
        pb
    }
}
