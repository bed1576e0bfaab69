//! Temporal parser: arbitrary date-like values into a canonical UTC instant.
//!
//! Producers ship timestamps as ISO strings, epoch seconds or milliseconds
//! (numeric or stringly), `DD/MM/YYYY` variants, and Indonesian month-name
//! dates. Resolution tries each interpretation in a fixed order and returns
//! the first valid instant; nothing here ever errors — unparseable input is
//! `None` and the caller drops the record from time-based views.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;

/// Epoch values at or below this magnitude are seconds, above are millis.
const EPOCH_MILLIS_CUTOFF: f64 = 1e12;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

static DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})$").unwrap());

/// `[day] monthname year`, matched against the normalized string.
static MONTH_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d{1,2})\s+)?([a-z]+)\s+(\d{4})$").unwrap());

/// Parse any date-like JSON value into a UTC instant.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(raw) => parse_instant_str(raw),
        _ => None,
    }
}

/// String resolution ladder: fully-numeric epoch, `D/M/Y`, Indonesian
/// month name, then generic ISO-style parsing. A step that yields an
/// invalid date is skipped, not returned.
pub fn parse_instant_str(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if NUMERIC_RE.is_match(trimmed) {
        if let Some(instant) = trimmed.parse::<f64>().ok().and_then(from_epoch) {
            return Some(instant);
        }
    }

    if let Some(captures) = DMY_RE.captures(trimmed) {
        let day: u32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let year = expand_year(captures[3].parse().ok()?, captures[3].len());
        if let Some(instant) = utc_midnight(year, month, day) {
            return Some(instant);
        }
    }

    let normalized = fold_ascii(trimmed);
    if let Some(captures) = MONTH_NAME_RE.captures(&normalized) {
        let day: u32 = captures
            .get(1)
            .map(|m| m.as_str().parse().unwrap_or(1))
            .unwrap_or(1);
        let year: i32 = captures[3].parse().ok()?;
        if let Some(month) = month_number(&captures[2]) {
            if let Some(instant) = utc_midnight(year, month, day) {
                return Some(instant);
            }
        }
    }

    parse_generic(trimmed)
}

/// Epoch heuristic shared by numeric values and numeric strings.
fn from_epoch(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() {
        return None;
    }
    if raw.abs() <= EPOCH_MILLIS_CUTOFF {
        Utc.timestamp_opt(raw as i64, 0).single()
    } else {
        Utc.timestamp_millis_opt(raw as i64).single()
    }
}

/// Two-digit years: ≥70 lands in the 1900s, otherwise the 2000s.
fn expand_year(year: i32, digits: usize) -> i32 {
    if digits <= 2 {
        if year >= 70 {
            1900 + year
        } else {
            2000 + year
        }
    } else {
        year
    }
}

fn utc_midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Lowercase and fold common Latin diacritics so month-name matching is
/// spelling-tolerant.
fn fold_ascii(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            _ => c,
        })
        .collect()
}

/// Indonesian month names, full and commonly abbreviated (incl. the older
/// `pebruari`/`nopember` spellings).
fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "januari" | "jan" => 1,
        "februari" | "feb" | "pebruari" | "peb" => 2,
        "maret" | "mar" => 3,
        "april" | "apr" => 4,
        "mei" => 5,
        "juni" | "jun" => 6,
        "juli" | "jul" => 7,
        "agustus" | "agu" | "agt" | "ags" => 8,
        "september" | "sep" | "sept" => 9,
        "oktober" | "okt" => 10,
        "november" | "nov" | "nopember" | "nop" => 11,
        "desember" | "des" => 12,
        _ => return None,
    };
    Some(month)
}

/// Generic fallback: RFC 3339, then the naive datetime/date spellings that
/// show up in exports without an offset.
fn parse_generic(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
