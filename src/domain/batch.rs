use super::reel::{ReelMetric, ReelStatus};
use serde::{Deserialize, Serialize};

/// All reels from one analysis run, in input order, with the top picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    entries: Vec<ReelMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_by_likes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_by_views: Option<usize>,
}

impl BatchResult {
    pub fn new(entries: Vec<ReelMetric>) -> Self {
        let top_by_likes = top_index(&entries, ReelMetric::likes_count);
        let top_by_views = top_index(&entries, ReelMetric::views_count);
        Self {
            entries,
            top_by_likes,
            top_by_views,
        }
    }

    pub fn entries(&self) -> &[ReelMetric] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_by_likes(&self) -> Option<&ReelMetric> {
        self.top_by_likes.and_then(|i| self.entries.get(i))
    }

    pub fn top_by_views(&self) -> Option<&ReelMetric> {
        self.top_by_views.and_then(|i| self.entries.get(i))
    }

    pub fn count_with_status(&self, status: ReelStatus) -> usize {
        self.entries.iter().filter(|e| e.status() == status).count()
    }
}

/// Index of the first successful entry holding the largest metric.
fn top_index(entries: &[ReelMetric], metric: fn(&ReelMetric) -> u64) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;

    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_success() {
            continue;
        }
        let value = metric(entry);
        // strictly greater keeps the earliest on ties
        if best.map_or(true, |(_, current)| value > current) {
            best = Some((i, value));
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reel::{ExtractedFields, ReelTarget};

    fn success(code: &str, likes: u64, views: u64) -> ReelMetric {
        let target = ReelTarget::from_url(&format!("https://instagram.com/reel/{code}/")).unwrap();
        ReelMetric::success(
            &target,
            ExtractedFields {
                likes_raw: Some(likes.to_string()),
                likes_count: likes,
                views_raw: Some(views.to_string()),
                views_count: views,
                ..Default::default()
            },
        )
    }

    #[test]
    fn ties_resolve_to_first_occurrence() {
        let batch = BatchResult::new(vec![
            success("A", 10, 1),
            success("B", 500, 1),
            success("C", 500, 1),
        ]);

        assert_eq!(batch.top_by_likes().unwrap().shortcode(), Some("B"));
        assert_eq!(batch.top_by_views().unwrap().shortcode(), Some("A"));
    }

    #[test]
    fn failed_and_invalid_entries_are_not_ranked() {
        let target = ReelTarget::from_url("https://instagram.com/reel/F/").unwrap();
        let batch = BatchResult::new(vec![
            ReelMetric::invalid("junk"),
            ReelMetric::failed(&target, "404"),
            success("S", 7, 0),
        ]);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.top_by_likes().unwrap().shortcode(), Some("S"));
        assert_eq!(batch.top_by_views().unwrap().shortcode(), Some("S"));
        assert_eq!(batch.count_with_status(ReelStatus::Success), 1);
        assert_eq!(batch.count_with_status(ReelStatus::Failed), 1);
        assert_eq!(batch.count_with_status(ReelStatus::Invalid), 1);
    }

    #[test]
    fn all_zero_batch_ranks_first_success() {
        let target = ReelTarget::from_url("https://instagram.com/reel/F/").unwrap();
        let batch = BatchResult::new(vec![
            ReelMetric::failed(&target, "timeout"),
            success("A", 0, 0),
            success("B", 0, 0),
        ]);
        assert_eq!(batch.top_by_likes().unwrap().shortcode(), Some("A"));
        assert_eq!(batch.top_by_views().unwrap().shortcode(), Some("A"));
        assert_eq!(batch.top_by_likes().unwrap().likes_count(), 0);
    }

    #[test]
    fn empty_batch() {
        let batch = BatchResult::new(Vec::new());
        assert!(batch.is_empty());
        assert!(batch.top_by_likes().is_none());
    }
}
