mod batch;
mod document;
mod reel;
mod report;
pub(crate) mod storage;

pub use batch::BatchResult;
pub use document::Document;
pub use reel::{extract_shortcode, ExtractedFields, ReelMetric, ReelStatus, ReelTarget};
pub use report::Report;
pub use storage::Storage;
