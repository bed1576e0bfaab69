//! Field path resolver for producer-defined record shapes.
//!
//! Upstream feeds disagree on field names and nesting, so every access goes
//! through an ordered candidate-path probe: the first present, non-null
//! value wins. Paths are dotted strings (`"rekap.total_like"`); a missing
//! or null segment short-circuits that path and moves on to the next.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Strict 3-digit grouping with `.` separators, e.g. `1.234.567`.
static DOT_GROUPING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(\.\d{3})+$").unwrap());

/// Strict 3-digit grouping with `,` separators, e.g. `1,234,567`.
static COMMA_GROUPING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})+$").unwrap());

/// Walk one dotted path. `None` as soon as a segment is missing.
fn walk<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = source;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// First present, non-null value among the candidate paths.
pub fn pick<'a>(source: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| walk(source, path))
        .find(|value| !value.is_null())
}

/// First candidate that resolves to a non-empty string after trimming.
/// Bare numbers are accepted too — producers ship ids both ways.
pub fn pick_str(source: &Value, paths: &[&str]) -> Option<String> {
    for path in paths {
        match walk(source, path) {
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First present value among the candidate paths, coerced to a number.
/// Locale-formatted strings are normalized; anything unparseable yields 0.
pub fn pick_number(source: &Value, paths: &[&str]) -> f64 {
    match pick(source, paths) {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Some(Value::String(raw)) => parse_locale_number(raw).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Non-negative integer variant of [`pick_number`], for engagement counts.
pub fn pick_count(source: &Value, paths: &[&str]) -> u64 {
    pick_number(source, paths).max(0.0) as u64
}

/// Normalize a locale-formatted number string (`"1.234.567"`, `"1,5"`,
/// `"Rp 12.345,60"`) into a plain value.
///
/// After stripping currency noise, the separator role is decided by which
/// of `.`/`,` occurs last (that one is the decimal separator when both are
/// present) or, with a single separator kind, by whether the digits match
/// a strict 3-digit grouping (then it is a thousands separator).
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let plain = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                // `,` is decimal: 1.234.567,89
                cleaned.replace('.', "").replace(',', ".")
            } else {
                // `.` is decimal: 1,234,567.89
                cleaned.replace(',', "")
            }
        }
        (Some(_), None) => {
            if DOT_GROUPING_RE.is_match(&cleaned) {
                cleaned.replace('.', "")
            } else {
                cleaned
            }
        }
        (None, Some(_)) => {
            if COMMA_GROUPING_RE.is_match(&cleaned) {
                cleaned.replace(',', "")
            } else {
                cleaned.replace(',', ".")
            }
        }
        (None, None) => cleaned,
    };

    plain.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- pick tests ---

    #[test]
    fn first_present_path_wins() {
        let record = json!({"b": 2, "a": 1});
        assert_eq!(pick(&record, &["a", "b"]), Some(&json!(1)));
    }

    #[test]
    fn null_values_are_skipped() {
        let record = json!({"a": null, "b": 2});
        assert_eq!(pick(&record, &["a", "b"]), Some(&json!(2)));
    }

    #[test]
    fn dotted_paths_walk_nesting() {
        let record = json!({"rekap": {"total_like": 7}});
        assert_eq!(pick(&record, &["total_like", "rekap.total_like"]), Some(&json!(7)));
    }

    #[test]
    fn missing_intermediate_short_circuits() {
        let record = json!({"rekap": null});
        assert_eq!(pick(&record, &["rekap.total_like"]), None);
    }

    // --- pick_str tests ---

    #[test]
    fn blank_strings_do_not_resolve() {
        let record = json!({"nama": "   ", "username": "budi"});
        assert_eq!(pick_str(&record, &["nama", "username"]), Some("budi".into()));
    }

    #[test]
    fn numeric_ids_resolve_as_strings() {
        let record = json!({"user_id": 82001234});
        assert_eq!(pick_str(&record, &["user_id"]), Some("82001234".into()));
    }

    // --- numeric normalization tests ---

    #[test]
    fn plain_numbers_pass_through() {
        let record = json!({"total_like": 12});
        assert_eq!(pick_number(&record, &["total_like"]), 12.0);
    }

    #[test]
    fn dot_grouped_thousands_are_collapsed() {
        assert_eq!(parse_locale_number("1.234.567"), Some(1_234_567.0));
        assert_eq!(parse_locale_number("1.234"), Some(1234.0));
    }

    #[test]
    fn comma_decimal_is_recognized() {
        assert_eq!(parse_locale_number("1,5"), Some(1.5));
        assert_eq!(parse_locale_number("1.234,56"), Some(1234.56));
    }

    #[test]
    fn dot_decimal_with_comma_grouping() {
        assert_eq!(parse_locale_number("1,234,567.89"), Some(1_234_567.89));
    }

    #[test]
    fn lone_dot_is_decimal_when_not_grouping() {
        assert_eq!(parse_locale_number("1234.5"), Some(1234.5));
    }

    #[test]
    fn currency_noise_is_stripped() {
        assert_eq!(parse_locale_number("Rp 12.345"), Some(12345.0));
    }

    #[test]
    fn garbage_defaults_to_zero() {
        let record = json!({"total_like": "banyak"});
        assert_eq!(pick_number(&record, &["total_like"]), 0.0);
        assert_eq!(pick_number(&record, &["missing"]), 0.0);
    }

    #[test]
    fn counts_clamp_negatives() {
        let record = json!({"total_like": -4});
        assert_eq!(pick_count(&record, &["total_like"]), 0);
    }
}
