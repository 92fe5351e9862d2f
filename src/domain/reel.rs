use crate::services::insight::InsightTier;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SHORTCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"instagram\.com/(?:reels?|p)/([A-Za-z0-9_-]+)").unwrap());

/// Pulls the shortcode out of a reel or post URL.
pub fn extract_shortcode(url: &str) -> Option<String> {
    SHORTCODE_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// What a fetcher is asked to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelTarget {
    pub url: String,
    pub shortcode: String,
}

impl ReelTarget {
    pub fn from_url(url: &str) -> Option<Self> {
        extract_shortcode(url).map(|shortcode| Self {
            url: url.to_string(),
            shortcode,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReelStatus {
    Success,
    Failed,
    Invalid,
}

impl std::fmt::Display for ReelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReelStatus::Success => "Success",
            ReelStatus::Failed => "Failed",
            ReelStatus::Invalid => "Invalid",
        };
        f.write_str(label)
    }
}

/// Fields recovered from one reel document. Every field is optional and
/// counts are 0 when the raw value is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub likes_raw: Option<String>,
    pub likes_count: u64,
    pub views_raw: Option<String>,
    pub views_count: u64,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl ExtractedFields {
    pub fn has_metrics(&self) -> bool {
        self.likes_raw.is_some() || self.views_raw.is_some()
    }
}

/// The outcome of analyzing one input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelMetric {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    shortcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    likes_raw: Option<String>,
    likes_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    views_raw: Option<String>,
    views_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    status: ReelStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ReelMetric {
    pub const CAPTION_PLACEHOLDER: &'static str = "No caption";

    pub fn success(target: &ReelTarget, fields: ExtractedFields) -> Self {
        Self {
            url: target.url.clone(),
            shortcode: Some(target.shortcode.clone()),
            likes_raw: fields.likes_raw,
            likes_count: fields.likes_count,
            views_raw: fields.views_raw,
            views_count: fields.views_count,
            caption: fields.caption,
            thumbnail_url: fields.thumbnail_url,
            status: ReelStatus::Success,
            error: None,
        }
    }

    pub fn failed(target: &ReelTarget, error: impl Into<String>) -> Self {
        Self {
            shortcode: Some(target.shortcode.clone()),
            status: ReelStatus::Failed,
            error: Some(error.into()),
            ..Self::empty(&target.url)
        }
    }

    pub fn invalid(url: &str) -> Self {
        Self {
            status: ReelStatus::Invalid,
            ..Self::empty(url)
        }
    }

    fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            shortcode: None,
            likes_raw: None,
            likes_count: 0,
            views_raw: None,
            views_count: 0,
            caption: None,
            thumbnail_url: None,
            status: ReelStatus::Invalid,
            error: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn shortcode(&self) -> Option<&str> {
        self.shortcode.as_deref()
    }

    pub fn likes_raw(&self) -> Option<&str> {
        self.likes_raw.as_deref()
    }

    pub fn likes_count(&self) -> u64 {
        self.likes_count
    }

    pub fn views_raw(&self) -> Option<&str> {
        self.views_raw.as_deref()
    }

    pub fn views_count(&self) -> u64 {
        self.views_count
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn caption_or_placeholder(&self) -> &str {
        self.caption().unwrap_or(Self::CAPTION_PLACEHOLDER)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn status(&self) -> ReelStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == ReelStatus::Success
    }

    pub fn insight(&self) -> InsightTier {
        InsightTier::from_likes(self.likes_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcode_from_reel_and_post_urls() {
        assert_eq!(
            extract_shortcode("https://www.instagram.com/reel/ABC123/").as_deref(),
            Some("ABC123")
        );
        assert_eq!(
            extract_shortcode("https://instagram.com/p/Cx_9-z?igsh=abc").as_deref(),
            Some("Cx_9-z")
        );
        assert_eq!(
            extract_shortcode("instagram.com/reels/XYZ").as_deref(),
            Some("XYZ")
        );
    }

    #[test]
    fn shortcode_missing_for_other_urls() {
        assert_eq!(extract_shortcode("not-a-url"), None);
        assert_eq!(extract_shortcode("https://instagram.com/someuser/"), None);
        assert_eq!(extract_shortcode("https://youtube.com/reel/ABC"), None);
    }

    #[test]
    fn constructors_derive_status() {
        let target = ReelTarget::from_url("https://instagram.com/reel/ABC/").unwrap();

        let ok = ReelMetric::success(&target, ExtractedFields::default());
        assert_eq!(ok.status(), ReelStatus::Success);
        assert_eq!(ok.error(), None);
        assert_eq!(ok.likes_count(), 0);

        let failed = ReelMetric::failed(&target, "timed out");
        assert_eq!(failed.status(), ReelStatus::Failed);
        assert_eq!(failed.error(), Some("timed out"));
        assert_eq!(failed.shortcode(), Some("ABC"));

        let invalid = ReelMetric::invalid("nope");
        assert_eq!(invalid.status(), ReelStatus::Invalid);
        assert_eq!(invalid.error(), None);
        assert_eq!(invalid.shortcode(), None);
    }

    #[test]
    fn caption_placeholder_when_absent() {
        let invalid = ReelMetric::invalid("nope");
        assert_eq!(invalid.caption_or_placeholder(), "No caption");
    }
}
