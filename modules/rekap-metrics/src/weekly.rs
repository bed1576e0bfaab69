//! Weekly bucketing: records into fixed calendar-week windows.
//!
//! Every requested week produces exactly one bucket, zero-filled when
//! nothing matches, so chart x-axes stay contiguous. Records whose
//! timestamp cannot be parsed fall into no bucket at all.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::Value;

use rekap_common::{WeekRange, WeeklyBucket};

use crate::fields::{pick, pick_count};
use crate::merge::{extract_comments, extract_likes};
use crate::temporal::parse_instant;

/// Timestamp spellings across producers.
const DATE_PATHS: &[&str] = &[
    "tanggal",
    "created_at",
    "createdAt",
    "timestamp",
    "taken_at",
    "date",
    "waktu",
    "rekap.tanggal",
    "rekap.created_at",
];

/// Share-count spellings.
const SHARE_PATHS: &[&str] = &[
    "total_share",
    "jumlah_share",
    "shares",
    "share_count",
    "rekap.total_share",
    "rekap.jumlah_share",
];

/// Parse a record's timestamp from the first recognized date field.
pub fn record_instant(record: &Value) -> Option<DateTime<Utc>> {
    pick(record, DATE_PATHS).and_then(parse_instant)
}

/// Sum metrics per requested week window (inclusive bounds), one bucket
/// per window, zero-filled when empty.
pub fn build_weekly_series(records: &[Value], weeks: &[WeekRange]) -> Vec<WeeklyBucket> {
    // Parse each timestamp once, not once per week.
    let stamped: Vec<(Option<DateTime<Utc>>, &Value)> = records
        .iter()
        .map(|record| (record_instant(record), record))
        .collect();

    weeks
        .iter()
        .map(|week| {
            let mut bucket = WeeklyBucket::empty(&week.key, &week.label);
            for (instant, record) in &stamped {
                let Some(instant) = instant else { continue };
                if *instant >= week.start && *instant <= week.end {
                    bucket.likes += extract_likes(record);
                    bucket.comments += extract_comments(record);
                    bucket.shares += pick_count(record, SHARE_PATHS);
                    bucket.posts += 1;
                }
            }
            bucket.interactions = bucket.likes + bucket.comments + bucket.shares;
            bucket
        })
        .collect()
}

/// Fixed weekly windows for one calendar month: 7-day chunks from the 1st,
/// the last chunk capped at month end, labeled `"Minggu N"`.
pub fn week_ranges_for_month(year: i32, month: u32) -> Vec<WeekRange> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last_day = days_in_month(year, month);

    let mut ranges = Vec::new();
    let mut start_day = 1u32;
    let mut index = 1u32;
    while start_day <= last_day {
        let end_day = (start_day + 6).min(last_day);
        let start = first.with_day(start_day).and_then(|d| d.and_hms_opt(0, 0, 0));
        let end = first
            .with_day(end_day)
            .and_then(|d| d.and_hms_opt(23, 59, 59));
        if let (Some(start), Some(end)) = (start, end) {
            ranges.push(WeekRange {
                key: format!("{year:04}-{month:02}-w{index}"),
                label: format!("Minggu {index}"),
                start: start.and_utc(),
                end: end.and_utc(),
            });
        }
        start_day = end_day + 1;
        index += 1;
    }
    ranges
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
