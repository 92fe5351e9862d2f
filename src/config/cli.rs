use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory to store analysis reports
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and analyze a list of reel URLs
    Analyze(AnalyzeArgs),
    /// Print a previously saved report
    Show {
        /// Path to a report JSON file
        report: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Reel URL to analyze (repeatable)
    #[arg(long = "url")]
    pub urls: Vec<String>,

    /// File with one reel URL per line, `-` reads stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// How reel pages are retrieved
    #[arg(long, value_enum, default_value_t = FetcherKind::Http)]
    pub fetcher: FetcherKind,

    /// Logged-in `sessionid` cookie for the session fetcher
    #[arg(long, env = "IG_SESSION_ID", hide_env_values = true)]
    pub session_id: Option<String>,

    /// Optional `csrftoken` cookie sent alongside the session id
    #[arg(long, env = "IG_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Base URL of the reel site
    #[arg(long, default_value = "https://www.instagram.com")]
    pub base_url: String,

    /// Delay between consecutive fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output format for the terminal
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Do not write a report file
    #[arg(long)]
    pub no_save: bool,

    /// Show a progress bar while analyzing
    #[arg(long)]
    pub progress: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// Anonymous HTTP GET of the public reel page
    Http,
    /// Authenticated request using a logged-in session cookie
    Session,
    /// Headless Chromium rendering (requires the `browser` feature)
    Browser,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_collects_repeated_urls_in_order() {
        let args = Args::try_parse_from([
            "reel-analyzer",
            "analyze",
            "--url",
            "https://instagram.com/reel/A/",
            "--url",
            "https://instagram.com/reel/B/",
        ])
        .unwrap();

        let Command::Analyze(analyze) = args.command else {
            panic!("expected analyze command");
        };
        assert_eq!(
            analyze.urls,
            vec!["https://instagram.com/reel/A/", "https://instagram.com/reel/B/"]
        );
        assert_eq!(analyze.fetcher, FetcherKind::Http);
        assert_eq!(analyze.delay_ms, 1000);
        assert_eq!(analyze.format, OutputFormat::Table);
    }

    #[test]
    fn fetcher_kind_parses_from_value() {
        let args = Args::try_parse_from([
            "reel-analyzer",
            "analyze",
            "--fetcher",
            "session",
            "--session-id",
            "abc",
        ])
        .unwrap();

        let Command::Analyze(analyze) = args.command else {
            panic!("expected analyze command");
        };
        assert_eq!(analyze.fetcher, FetcherKind::Session);
        assert_eq!(analyze.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn show_takes_report_path() {
        let args =
            Args::try_parse_from(["reel-analyzer", "show", "data/report_1.json"]).unwrap();
        assert!(matches!(args.command, Command::Show { .. }));
    }
}
