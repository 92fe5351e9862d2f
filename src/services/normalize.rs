use once_cell::sync::Lazy;
use regex::Regex;

static COUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)?(?:\.([0-9]+))?([km])?").unwrap());

/// Normalizes an optional displayed count. Absent input is 0.
pub fn normalize_count(text: Option<&str>) -> u64 {
    text.map(parse_count).unwrap_or(0)
}

/// Converts a displayed count such as "1.2K", "3M" or "4,210" into an integer.
///
/// Whitespace and thousands separators are ignored, the suffix is
/// case-insensitive, and the scaled value is truncated toward zero.
/// Anything that does not start with a number yields 0.
pub fn parse_count(text: &str) -> u64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect::<String>()
        .to_lowercase();

    let Some(caps) = COUNT_REGEX.captures(&cleaned) else {
        return 0;
    };

    let whole = caps.get(1).map(|m| m.as_str());
    let fraction = caps.get(2).map(|m| m.as_str());
    if whole.is_none() && fraction.is_none() {
        return 0;
    }

    let multiplier = match caps.get(3).map(|m| m.as_str()) {
        Some("k") => 1_000,
        Some("m") => 1_000_000,
        _ => 1,
    };

    scale(whole.unwrap_or("0"), fraction.unwrap_or(""), multiplier).unwrap_or(0)
}

fn scale(whole: &str, fraction: &str, multiplier: u64) -> Option<u64> {
    let whole = whole.parse::<u64>().ok()?.checked_mul(multiplier)?;

    // multiplier is at most 10^6, later digits never add a whole unit
    let digits: String = fraction.chars().take(6).collect();
    if digits.is_empty() {
        return Some(whole);
    }

    let numerator: u64 = digits.parse().ok()?;
    let denominator = 10u64.pow(digits.len() as u32);
    whole.checked_add(numerator * multiplier / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_scale() {
        assert_eq!(parse_count("1.2K"), 1_200);
        assert_eq!(parse_count("3M"), 3_000_000);
        assert_eq!(parse_count("2.5m"), 2_500_000);
        assert_eq!(parse_count("12.3k"), 12_300);
        assert_eq!(parse_count(".5k"), 500);
    }

    #[test]
    fn separators_and_whitespace_are_ignored() {
        assert_eq!(parse_count("4,210"), 4_210);
        assert_eq!(parse_count("  1,234,567 "), 1_234_567);
        assert_eq!(parse_count("1.2 K"), 1_200);
    }

    #[test]
    fn decimal_scaling_is_exact_and_truncates() {
        assert_eq!(parse_count("4.1k"), 4_100);
        assert_eq!(parse_count("1.999k"), 1_999);
        assert_eq!(parse_count("1.2345k"), 1_234);
        assert_eq!(parse_count("0.5"), 0);
        assert_eq!(parse_count("7.9"), 7);
        assert_eq!(parse_count("1.23456789m"), 1_234_567);
    }

    #[test]
    fn trailing_text_after_the_number_is_ignored() {
        assert_eq!(parse_count("1.2K likes"), 1_200);
        assert_eq!(parse_count("500 views"), 500);
    }

    #[test]
    fn unparseable_input_is_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("N/A"), 0);
        assert_eq!(parse_count("k"), 0);
        assert_eq!(parse_count("likes 12"), 0);
        assert_eq!(normalize_count(None), 0);
    }

    #[test]
    fn non_ascii_digits_end_the_number() {
        assert_eq!(parse_count("1.12345\u{0661}k"), 1);
        assert_eq!(parse_count("\u{0661}\u{0662}k"), 0);
        assert_eq!(parse_count("2.\u{0661}5m"), 2);
    }

    #[test]
    fn overflow_is_zero() {
        assert_eq!(parse_count("99999999999999999999999"), 0);
        assert_eq!(parse_count("18446744073709551615m"), 0);
    }

    #[test]
    fn normalizing_a_normalized_value_is_stable() {
        for input in ["1.2K", "3M", "4,210", "0", "999", "12.3k", "1.999k", "abc"] {
            let once = parse_count(input);
            assert_eq!(parse_count(&once.to_string()), once, "input {input}");
        }
    }
}
