//! Weekly trend series contract: one bucket per requested week, zero-filled
//! when empty, never omitted.

use serde_json::json;

use rekap_metrics::{build_weekly_series, week_ranges_for_month};

#[test]
fn sparse_data_still_fills_every_week() {
    let weeks = &week_ranges_for_month(2024, 5)[..4];
    let records = vec![
        json!({"tanggal": "2024-05-02", "total_like": 4, "total_komentar": 1}),
        json!({"tanggal": "2024-05-16", "total_like": 2, "total_share": 3}),
    ];

    let series = build_weekly_series(&records, weeks);
    assert_eq!(series.len(), 4, "4 requested weeks, 4 buckets");

    assert_eq!(series[0].likes, 4);
    assert_eq!(series[0].comments, 1);
    assert_eq!(series[0].interactions, 5);
    assert_eq!(series[0].posts, 1);

    for empty_week in [&series[1], &series[3]] {
        assert_eq!(empty_week.likes, 0);
        assert_eq!(empty_week.comments, 0);
        assert_eq!(empty_week.shares, 0);
        assert_eq!(empty_week.interactions, 0);
        assert_eq!(empty_week.posts, 0);
    }

    assert_eq!(series[2].likes, 2);
    assert_eq!(series[2].shares, 3);
    assert_eq!(series[2].interactions, 5);
}

#[test]
fn mixed_date_encodings_bucket_together() {
    let weeks = week_ranges_for_month(2024, 5);
    let records = vec![
        json!({"tanggal": "2024-05-20T10:00:00Z", "total_like": 1}),
        json!({"created_at": 1716195600, "total_like": 1}),
        json!({"timestamp": "1716195600000", "total_like": 1}),
        json!({"tanggal": "20/5/2024", "total_like": 1}),
        json!({"tanggal": "20 Mei 2024", "total_like": 1}),
    ];
    let series = build_weekly_series(&records, &weeks);
    // All five encodings land on 2024-05-20, which is week 3 (days 15–21).
    assert_eq!(series[2].posts, 5);
    assert_eq!(series[2].likes, 5);
}

#[test]
fn records_without_dates_never_bucket() {
    let weeks = week_ranges_for_month(2024, 5);
    let records = vec![
        json!({"total_like": 50}),
        json!({"tanggal": "tanggal tidak jelas", "total_like": 50}),
    ];
    let series = build_weekly_series(&records, &weeks);
    assert!(series.iter().all(|bucket| bucket.posts == 0));
}

#[test]
fn empty_record_set_yields_full_zeroed_series() {
    let weeks = week_ranges_for_month(2024, 2);
    let series = build_weekly_series(&[], &weeks);
    assert_eq!(series.len(), weeks.len());
    assert!(series.iter().all(|bucket| bucket.interactions == 0));
}
