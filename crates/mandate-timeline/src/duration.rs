//! Deadline-to-days parsing

use regex::Regex;
use std::sync::OnceLock;

/// Assumed task duration when no deadline is stated
const DEFAULT_DURATION_DAYS: u64 = 5;

/// Average processing time assumed for unparseable deadlines
const FALLBACK_DURATION_DAYS: u64 = 7;

fn duration_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*(day|week|month|year)").expect("static pattern compiles"))
}

/// Parse a free-text deadline into a number of days
///
/// "15 days", "2 weeks", "1 month" parse directly; "immediate" and
/// "instantly" mean zero; bare "within a week"/"month" fall back to the
/// unit; an empty deadline assumes a 5-day task and anything else
/// unparseable assumes 7.
pub fn parse_deadline(deadline: &str) -> u64 {
    let text = deadline.trim().to_lowercase();
    if text.is_empty() {
        return DEFAULT_DURATION_DAYS;
    }

    if text.contains("immediate") || text.contains("instantly") {
        return 0;
    }

    if let Some(caps) = duration_pattern().captures(&text) {
        if let Ok(value) = caps[1].parse::<u64>() {
            let per_unit = match &caps[2] {
                "day" => 1,
                "week" => 7,
                "month" => 30,
                _ => 365,
            };
            return value.saturating_mul(per_unit);
        }
    }

    if text.contains("week") {
        return 7;
    }
    if text.contains("month") {
        return 30;
    }

    FALLBACK_DURATION_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_units() {
        assert_eq!(parse_deadline("15 days"), 15);
        assert_eq!(parse_deadline("2 weeks"), 14);
        assert_eq!(parse_deadline("1 month"), 30);
        assert_eq!(parse_deadline("1 year"), 365);
    }

    #[test]
    fn test_unit_without_space() {
        assert_eq!(parse_deadline("30days"), 30);
    }

    #[test]
    fn test_immediate_is_zero() {
        assert_eq!(parse_deadline("immediate"), 0);
        assert_eq!(parse_deadline("Immediately"), 0);
        assert_eq!(parse_deadline("instantly"), 0);
    }

    #[test]
    fn test_bare_unit_fallbacks() {
        assert_eq!(parse_deadline("within a week"), 7);
        assert_eq!(parse_deadline("within a month"), 30);
    }

    #[test]
    fn test_empty_assumes_default_task_duration() {
        assert_eq!(parse_deadline(""), 5);
        assert_eq!(parse_deadline("   "), 5);
    }

    #[test]
    fn test_unparseable_falls_back() {
        assert_eq!(parse_deadline("before the next policy anniversary"), 7);
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let days = parse_deadline("99999999999999999999 years");
        // Unparseable magnitude falls through to the fallback
        assert_eq!(days, 7);
    }
}
