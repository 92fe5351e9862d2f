use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub mod cli;

pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/124.0 Safari/537.36"
);

pub struct Config {
    pub args: Args,
}

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self::from_args(Args::parse()))
    }

    pub fn from_args(args: Args) -> Self {
        Self { args }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir exists: {}", self.args.data_dir.display());
        Ok(())
    }
}

/// Builds the shared HTTP client used by the HTTP and session fetchers.
pub fn http_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()?;
    Ok(client)
}
