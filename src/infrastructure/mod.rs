mod fetchers;
mod storage;

#[cfg(feature = "browser")]
pub use fetchers::browser::BrowserFetcher;
pub use fetchers::{
    build_fetcher,
    http::HttpFetcher,
    session::{SessionContext, SessionFetcher},
    ReelFetcher,
};
pub use storage::fs_store::FileSystemStore;
