//! Record merger/deduplicator for the likes and comments streams.
//!
//! The two streams are independent exports of overlapping underlying
//! events, so a person frequently appears in both (and more than once in
//! one) with partially-filled fields. Folding keys on
//! `"{client_id}::{identity}"` and takes the per-metric maximum, which
//! makes the merge idempotent and order-independent on values; profile
//! fields keep the earliest non-empty spelling.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use rekap_common::MergedRecord;

use crate::fields::{pick_count, pick_str};
use crate::identity::{resolve_client_id, resolve_personnel_identity};

/// Like-count spellings across producers, flat and nested.
pub const LIKE_PATHS: &[&str] = &[
    "total_like",
    "jumlah_like",
    "likes",
    "like_count",
    "rekap.total_like",
    "rekap.jumlah_like",
    "rekap.like_personil",
    "metrics.likes_personil",
];

/// Comment-count spellings across producers, flat and nested.
pub const COMMENT_PATHS: &[&str] = &[
    "total_komentar",
    "jumlah_komentar",
    "comments",
    "comment_count",
    "rekap.total_komentar",
    "rekap.jumlah_komentar",
    "rekap.komentar_personil",
    "metrics.comments_personil",
];

/// Display-name spellings.
pub const NAME_PATHS: &[&str] = &["nama", "name", "nama_personil", "full_name"];

/// Personnel username spellings.
pub const USERNAME_PATHS: &[&str] = &["username", "instagram_username", "insta_username"];

/// Client display-name spellings.
pub const CLIENT_NAME_PATHS: &[&str] = &[
    "nama_client",
    "client_name",
    "client",
    "rekap.nama_client",
    "rekap.client_name",
];

/// Organizational unit spellings, most specific first.
pub const SATFUNG_PATHS: &[&str] = &["satfung", "subsatker", "rekap.satfung", "rekap.subsatker"];

pub const DIVISI_PATHS: &[&str] = &["divisi", "rekap.divisi"];

pub fn extract_likes(record: &Value) -> u64 {
    pick_count(record, LIKE_PATHS)
}

pub fn extract_comments(record: &Value) -> u64 {
    pick_count(record, COMMENT_PATHS)
}

/// Fold the likes stream then the comments stream into at most one record
/// per (client, person) identity, in first-seen order.
///
/// Cross-stream order cannot change the final metric values (the merge is
/// a pure max); it only decides which record's profile fields win, and
/// there the earliest non-empty value sticks.
pub fn merge_streams(likes_records: &[Value], comment_records: &[Value]) -> Vec<MergedRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut by_identity: HashMap<String, MergedRecord> = HashMap::new();

    for record in likes_records.iter().chain(comment_records.iter()) {
        if !record.is_object() {
            continue;
        }
        let client_id = resolve_client_id(record);
        let identity = resolve_personnel_identity(record);
        let key = format!("{client_id}::{identity}");

        let entry = by_identity.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            MergedRecord {
                client_id,
                client_name: None,
                satfung: None,
                divisi: None,
                identity,
                nama: String::new(),
                username: None,
                likes: 0,
                comments: 0,
            }
        });

        fill_profile(entry, record);
        entry.likes = entry.likes.max(extract_likes(record));
        entry.comments = entry.comments.max(extract_comments(record));
    }

    debug!(
        likes_in = likes_records.len(),
        comments_in = comment_records.len(),
        merged = order.len(),
        "merged activity streams"
    );

    order
        .into_iter()
        .filter_map(|key| by_identity.remove(&key))
        .collect()
}

/// Earliest non-empty wins: only fields still unset take a value.
fn fill_profile(entry: &mut MergedRecord, record: &Value) {
    if entry.nama.is_empty() {
        if let Some(nama) = pick_str(record, NAME_PATHS) {
            entry.nama = nama;
        }
    }
    if entry.username.is_none() {
        entry.username = pick_str(record, USERNAME_PATHS);
    }
    if entry.client_name.is_none() {
        entry.client_name = pick_str(record, CLIENT_NAME_PATHS);
    }
    if entry.satfung.is_none() {
        entry.satfung = pick_str(record, SATFUNG_PATHS);
    }
    if entry.divisi.is_none() {
        entry.divisi = pick_str(record, DIVISI_PATHS);
    }
}
