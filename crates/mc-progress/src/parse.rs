//! Numeric extraction from completion replies
//!
//! The model is instructed to answer with digits only, but replies like
//! "57% complete" still happen. The contract: take the first contiguous
//! digit run; a reply with no digits at all counts as 0 rather than an
//! error, so a malformed reply still yields a usable number.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));

/// First contiguous digit run in the text, or 0 when none exists.
/// Runs too long for an i64 saturate to i64::MAX so the clamp still holds.
pub fn extract_digit_run(text: &str) -> i64 {
    DIGIT_RUN
        .find(text)
        .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Clamp a raw parsed value into the valid progress range.
pub fn clamp_progress(raw: i64) -> i32 {
    raw.clamp(0, 100) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(extract_digit_run("45"), 45);
    }

    #[test]
    fn test_first_run_wins() {
        assert_eq!(extract_digit_run("57% complete"), 57);
        assert_eq!(extract_digit_run("day 45 of 100"), 45);
    }

    #[test]
    fn test_no_digits_is_zero() {
        assert_eq!(extract_digit_run("I cannot estimate this."), 0);
        assert_eq!(extract_digit_run(""), 0);
    }

    #[test]
    fn test_digits_inside_prose() {
        assert_eq!(
            extract_digit_run("progress is definitely around 150 percent done!!"),
            150
        );
    }

    #[test]
    fn test_overflowing_run_saturates() {
        let raw = extract_digit_run("99999999999999999999999999");
        assert_eq!(raw, i64::MAX);
        assert_eq!(clamp_progress(raw), 100);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(57), 57);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(150), 100);
    }
}
