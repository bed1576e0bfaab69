//! Pure transformation pipeline over loosely-typed engagement records:
//! dedup/merge, per-client aggregation, personnel ranking, weekly trend
//! series, and platform post normalization.
//!
//! Everything here is synchronous and allocation-scoped: each call builds
//! its own maps and returns plain data. Malformed input never errors —
//! it degrades to sentinels and zeros.

pub mod aggregate;
pub mod fields;
pub mod identity;
pub mod merge;
pub mod pipeline;
pub mod post;
pub mod ranking;
pub mod temporal;
pub mod weekly;

pub use aggregate::aggregate;
pub use merge::merge_streams;
pub use pipeline::build_engagement_report;
pub use post::normalize_post;
pub use ranking::rank_personnel;
pub use temporal::parse_instant;
pub use weekly::{build_weekly_series, week_ranges_for_month};
