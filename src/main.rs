use reel_analyzer::config::Config;
use reel_analyzer::error::Result;
use reel_analyzer::infrastructure::FileSystemStore;
use reel_analyzer::services::reel_service::ReelService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(FileSystemStore::new(&config.args.data_dir));
    let service = ReelService::new(config, store);
    service.run().await?;

    info!("Done");
    Ok(())
}
