use super::Report;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Persists the report and returns where it was written.
    fn save_report(&self, report: &Report) -> Result<PathBuf>;
    fn load_report(&self, path: &Path) -> Result<Option<Report>>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const REPORT_PREFIX: &'static str = "report";
}
