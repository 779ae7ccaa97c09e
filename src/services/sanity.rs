//! Hunt-sanity threshold predicate.

use crate::models::{is_valid_threshold, parse_sanity_parts};

/// Returns true if every part of `sanity_field` lies strictly below `threshold`.
///
/// A single value must be `< threshold`; every value of a range must be
/// `< threshold`, in whatever order the bounds were written. A missing threshold, or one that is not a finite
/// number in `[0, 100]`, disables the predicate and it returns false.
/// Unparsable parts are `NaN` and never count as below.
///
/// # Examples
///
/// ```
/// use phasmbase::services::sanity::is_below_threshold;
///
/// assert!(!is_below_threshold("15-75", Some(50.0)));
/// assert!(is_below_threshold("15-75", Some(80.0)));
/// assert!(!is_below_threshold("15-75", None));
/// ```
#[must_use]
pub fn is_below_threshold(sanity_field: &str, threshold: Option<f64>) -> bool {
    let Some(threshold) = threshold.filter(|t| is_valid_threshold(*t)) else {
        return false;
    };

    parse_sanity_parts(sanity_field)
        .iter()
        .all(|part| part.upper() < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert!(is_below_threshold("35", Some(50.0)));
        assert!(!is_below_threshold("50", Some(50.0)));
        assert!(!is_below_threshold("70", Some(50.0)));
    }

    #[test]
    fn test_every_slash_part_must_be_below() {
        assert!(!is_below_threshold("40/60", Some(50.0)));
        assert!(is_below_threshold("40/60", Some(61.0)));
        assert!(!is_below_threshold("70/100", Some(100.0)));
    }

    #[test]
    fn test_range_uses_upper_bound() {
        assert!(!is_below_threshold("15-75", Some(50.0)));
        assert!(!is_below_threshold("15-75", Some(75.0)));
        assert!(is_below_threshold("15-75", Some(80.0)));
    }

    #[test]
    fn test_inverted_range_compares_its_larger_bound() {
        assert!(!is_below_threshold("75-15", Some(50.0)));
        assert!(is_below_threshold("75-15", Some(80.0)));
    }

    #[test]
    fn test_every_hyphen_segment_counts() {
        assert!(!is_below_threshold("35/50-70-90", Some(80.0)));
        assert!(is_below_threshold("35/50-70-90", Some(91.0)));
    }

    #[test]
    fn test_disabled_thresholds() {
        assert!(!is_below_threshold("10", None));
        assert!(!is_below_threshold("10", Some(f64::NAN)));
        assert!(!is_below_threshold("10", Some(120.0)));
        assert!(!is_below_threshold("10", Some(-5.0)));
    }

    #[test]
    fn test_malformed_part_never_qualifies() {
        assert!(!is_below_threshold("unknown", Some(100.0)));
        assert!(!is_below_threshold("20/??", Some(100.0)));
        assert!(!is_below_threshold("", Some(100.0)));
    }

    #[test]
    fn test_zero_threshold_never_matches_non_negative_values() {
        assert!(!is_below_threshold("0", Some(0.0)));
    }
}
