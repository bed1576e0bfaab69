//! Pipeline orchestration: merge → aggregate → rank, one call per report.
//!
//! Stateless by construction — every invocation allocates its own maps and
//! returns plain data, so concurrent callers never share anything.

use serde_json::Value;
use tracing::info;

use rekap_common::{AggregateResult, Config, MergedRecord};

use crate::aggregate::{aggregate, directory_is_active};
use crate::merge::merge_streams;
use crate::ranking::rank_personnel;

/// Build a full engagement report from the raw likes/comments streams and
/// an optional personnel directory.
///
/// Inactive directory entries are excluded from placeholder seeding;
/// `top_personnel` comes back in the canonical leaderboard order (key
/// personnel first, then interactions descending).
pub fn build_engagement_report(
    likes_records: &[Value],
    comment_records: &[Value],
    directory_users: Option<&[Value]>,
    config: &Config,
) -> AggregateResult {
    let merged = merge_streams(likes_records, comment_records);
    let records: Vec<Value> = merged.into_iter().map(MergedRecord::into_value).collect();

    let active_roster: Option<Vec<Value>> = directory_users.map(|users| {
        users
            .iter()
            .filter(|user| directory_is_active(user))
            .cloned()
            .collect()
    });

    let mut result = aggregate(&records, active_roster.as_deref());
    result.top_personnel = rank_personnel(&result.top_personnel, &config.key_personnel);

    info!(
        likes_in = likes_records.len(),
        comments_in = comment_records.len(),
        clients = result.clients.len(),
        personnel = result.totals.total_personnel,
        active = result.totals.active_personnel,
        "engagement report built"
    );

    result
}
