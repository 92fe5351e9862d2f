use crate::config::cli::{AnalyzeArgs, Command, OutputFormat};
use crate::config::Config;
use crate::domain::{Report, Storage};
use crate::error::{ReelError, Result};
use crate::infrastructure::build_fetcher;
use crate::services::analysis::BatchAnalyzer;
use crate::services::render::{render_summary, render_table};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct ReelService {
    config: Config,
    store: Arc<dyn Storage>,
}

impl ReelService {
    pub fn new(config: Config, store: Arc<dyn Storage + 'static>) -> Self {
        Self { config, store }
    }

    pub async fn run(&self) -> Result<()> {
        match &self.config.args.command {
            Command::Analyze(args) => self.analyze(args).await,
            Command::Show { report } => self.show(report),
        }
    }

    /// Reads the URL list, analyzes it, saves the report unless `--no-save`
    /// is given, and prints the outcome.
    async fn analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let urls = collect_urls(args)?;
        if urls.is_empty() {
            return Err(ReelError::Config(
                "no reel URLs given, use --url or --input".into(),
            ));
        }
        info!("Analyzing {} reel URLs", urls.len());

        let fetcher = build_fetcher(args).await?;
        let analyzer = BatchAnalyzer::new(fetcher)
            .with_delay(Duration::from_millis(args.delay_ms))
            .with_progress(args.progress);

        let result = analyzer.analyze(&urls).await;
        info!("Analysis complete: {} entries", result.len());

        let report = Report::new(result);
        if !args.no_save {
            self.config.ensure_directories()?;
            let path = self.store.save_report(&report)?;
            info!("Saved report to {}", path.display());
        }

        print_report(&report, args.format)
    }

    fn show(&self, path: &Path) -> Result<()> {
        let report = self
            .store
            .load_report(path)?
            .ok_or_else(|| ReelError::Other(format!("report not found: {}", path.display())))?;

        info!("Loaded report generated at {}", report.generated_at);
        print_report(&report, OutputFormat::Table)
    }
}

fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!("{}", render_table(&report.result));
            println!("{}", render_summary(&report.result));
        }
    }
    Ok(())
}

/// URLs from `--url` flags first, then from the input file or stdin.
fn collect_urls(args: &AnalyzeArgs) -> Result<Vec<String>> {
    let mut urls: Vec<String> = args
        .urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if let Some(input) = &args.input {
        let text = if input.as_os_str() == "-" {
            std::io::read_to_string(std::io::stdin())?
        } else {
            std::fs::read_to_string(input)?
        };
        urls.extend(parse_url_list(&text));
    }

    Ok(urls)
}

/// One URL per line; surrounding whitespace trimmed, blank lines skipped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
