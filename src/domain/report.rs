use crate::domain::batch::BatchResult;
use crate::domain::reel::ReelStatus;
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub total_reels: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub invalid: usize,
    pub generated_at: String,
    pub version: String,
    pub result: BatchResult,
}

impl Report {
    pub fn new(result: BatchResult) -> Self {
        Self {
            total_reels: result.len(),
            succeeded: result.count_with_status(ReelStatus::Success),
            failed: result.count_with_status(ReelStatus::Failed),
            invalid: result.count_with_status(ReelStatus::Invalid),
            generated_at: Local::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}
