use crate::domain::{BatchResult, ReelMetric, ReelStatus};
use std::fmt::Write;

const CAPTION_WIDTH: usize = 40;

/// Plain-text table of every entry in input order.
pub fn render_table(result: &BatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<8} {:>12} {:>12}  {:<48} {}",
        "#", "Status", "Likes", "Views", "URL", "Caption"
    );

    for (i, entry) in result.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<8} {:>12} {:>12}  {:<48} {}",
            i + 1,
            entry.status().to_string(),
            count_cell(entry.likes_raw(), entry.likes_count()),
            count_cell(entry.views_raw(), entry.views_count()),
            entry.url(),
            truncate(entry.caption_or_placeholder(), CAPTION_WIDTH),
        );
    }

    out
}

/// Totals, the error list and the top performers.
pub fn render_summary(result: &BatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Analyzed {} reels: {} succeeded, {} failed, {} invalid",
        result.len(),
        result.count_with_status(ReelStatus::Success),
        result.count_with_status(ReelStatus::Failed),
        result.count_with_status(ReelStatus::Invalid),
    );

    let problems: Vec<String> = result.entries().iter().filter_map(problem_line).collect();
    if !problems.is_empty() {
        let _ = writeln!(out, "\nSome errors occurred:");
        for line in problems {
            let _ = writeln!(out, "  - {line}");
        }
    }

    match result.top_by_likes().filter(|top| top.likes_count() > 0) {
        Some(top) => {
            let tier = top.insight();
            let _ = writeln!(out, "\nTop performing reel: {}", top.url());
            let _ = writeln!(out, "  {} likes", format_count(top.likes_count()));
            let _ = writeln!(out, "  Insight: {} - {}", tier.label(), tier.description());
        }
        None => {
            let _ = writeln!(out, "\nNo likes could be recovered, nothing to rank.");
        }
    }

    if let Some(top) = result.top_by_views().filter(|top| top.views_count() > 0) {
        let _ = writeln!(
            out,
            "\nMost viewed reel: {} ({} views)",
            top.url(),
            format_count(top.views_count())
        );
    }

    out
}

fn count_cell(raw: Option<&str>, count: u64) -> String {
    raw.map(|_| format_count(count)).unwrap_or_else(|| "-".into())
}

fn problem_line(entry: &ReelMetric) -> Option<String> {
    match entry.status() {
        ReelStatus::Invalid => Some(format!("Invalid URL format: {}", entry.url())),
        ReelStatus::Failed => Some(format!(
            "{}: {}",
            entry.url(),
            entry.error().unwrap_or("unknown error")
        )),
        ReelStatus::Success => None,
    }
}

/// Formats a count with thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExtractedFields, ReelTarget};

    fn batch() -> BatchResult {
        let ok = ReelTarget::from_url("https://instagram.com/reel/ABC123/").unwrap();
        let bad = ReelTarget::from_url("https://instagram.com/reel/GONE/").unwrap();
        BatchResult::new(vec![
            ReelMetric::success(
                &ok,
                ExtractedFields {
                    likes_raw: Some("1.5K".into()),
                    likes_count: 1500,
                    caption: Some("Morning\nroutine".into()),
                    ..Default::default()
                },
            ),
            ReelMetric::failed(&bad, "unexpected HTTP status 404"),
            ReelMetric::invalid("not-a-url"),
        ])
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééééé", 6), "ééé...");
    }

    #[test]
    fn table_lists_every_entry() {
        let table = render_table(&batch());
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("1,500"));
        assert!(table.contains("Morning routine"));
        assert!(table.contains("No caption"));
    }

    #[test]
    fn summary_reports_errors_and_top_reel() {
        let summary = render_summary(&batch());
        assert!(summary.contains("1 succeeded, 1 failed, 1 invalid"));
        assert!(summary.contains("Invalid URL format: not-a-url"));
        assert!(summary.contains("https://instagram.com/reel/GONE/: unexpected HTTP status 404"));
        assert!(summary.contains("Top performing reel: https://instagram.com/reel/ABC123/"));
        assert!(summary.contains("Moderate engagement"));
        assert!(!summary.contains("Most viewed"));
    }

    #[test]
    fn all_zero_batch_has_nothing_to_rank() {
        let target = ReelTarget::from_url("https://instagram.com/reel/ZERO/").unwrap();
        let batch = BatchResult::new(vec![ReelMetric::success(
            &target,
            ExtractedFields::default(),
        )]);
        assert!(batch.top_by_likes().is_some());

        let summary = render_summary(&batch);
        assert!(summary.contains("No likes could be recovered, nothing to rank."));
        assert!(!summary.contains("Top performing reel"));
        assert!(!summary.contains("Most viewed"));
    }
}
