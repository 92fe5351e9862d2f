//! Engagement metrics for short-form video reels.
//!
//! Fetches reel pages, extracts likes, views, caption and thumbnail,
//! normalizes displayed counts and ranks the results.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use domain::{BatchResult, Document, ExtractedFields, ReelMetric, ReelStatus, ReelTarget};
pub use error::{ReelError, Result};
pub use infrastructure::{HttpFetcher, ReelFetcher, SessionContext, SessionFetcher};
pub use services::analysis::BatchAnalyzer;
pub use services::extraction::FieldExtractor;
pub use services::insight::InsightTier;
pub use services::normalize::{normalize_count, parse_count};
