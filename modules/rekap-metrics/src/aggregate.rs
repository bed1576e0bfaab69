//! Aggregation engine: merged activity records into per-client roll-ups,
//! global totals, and the flattened personnel list.
//!
//! The pass sequence per run:
//! 1. seed zero-activity placeholders from the personnel directory (when given)
//! 2. fold activity records, max-merging repeated identities
//! 3. roll personnel into client sums (addition is safe here — each
//!    identity is already deduplicated) and derive the global totals
//!
//! All maps are allocated fresh per call; there is no cross-call state.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use rekap_common::{AggregateResult, AggregateTotals, ClientAggregate, PersonnelAggregate};

use crate::fields::{pick, pick_str};
use crate::identity::{resolve_client_id, resolve_personnel_identity};
use crate::merge::{
    extract_comments, extract_likes, CLIENT_NAME_PATHS, DIVISI_PATHS, NAME_PATHS, SATFUNG_PATHS,
    USERNAME_PATHS,
};

/// Grouping scope for the client key: most specific unit first, then the
/// client display name.
const SCOPE_PATHS: &[&str] = &[
    "satfung",
    "divisi",
    "subsatker",
    "rekap.satfung",
    "rekap.divisi",
    "rekap.subsatker",
];

/// Directory active-status spellings.
const ACTIVE_STATUS_PATHS: &[&str] = &["status", "is_active", "aktif"];

/// Display-name fallback for records carrying no name field at all.
const UNNAMED: &str = "Tanpa Nama";

struct ClientBucket {
    client_id: String,
    client_name: Option<String>,
    satfung: Option<String>,
    divisi: Option<String>,
    personnel_order: Vec<String>,
    personnel: HashMap<String, PersonnelAggregate>,
}

/// Aggregate activity records, optionally pre-seeded with a personnel
/// directory so silent clients and personnel still surface.
///
/// `top_personnel` comes back in client-then-insertion order; the ranking
/// view applies its own sort (see [`crate::ranking`]).
pub fn aggregate(records: &[Value], directory_users: Option<&[Value]>) -> AggregateResult {
    let mut client_order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, ClientBucket> = HashMap::new();

    if let Some(users) = directory_users {
        for user in users {
            register(&mut client_order, &mut buckets, user, 0, 0);
        }
    }

    for record in records {
        let likes = extract_likes(record);
        let comments = extract_comments(record);
        register(&mut client_order, &mut buckets, record, likes, comments);
    }

    let mut clients = Vec::with_capacity(client_order.len());
    let mut totals = AggregateTotals::default();
    let mut top_personnel = Vec::new();

    for client_key in client_order {
        let Some(mut bucket) = buckets.remove(&client_key) else {
            continue;
        };

        let client_name = bucket
            .client_name
            .take()
            .unwrap_or_else(|| bucket.client_id.clone());
        let mut client = ClientAggregate {
            key: client_key,
            client_id: bucket.client_id,
            client_name,
            satfung: bucket.satfung,
            divisi: bucket.divisi,
            personnel: Vec::with_capacity(bucket.personnel_order.len()),
            total_likes: 0,
            total_comments: 0,
            total_personnel: 0,
            active_personnel: 0,
            personnel_with_likes: 0,
        };

        for personnel_key in bucket.personnel_order {
            let Some(entry) = bucket.personnel.remove(&personnel_key) else {
                continue;
            };
            client.total_likes += entry.likes;
            client.total_comments += entry.comments;
            client.total_personnel += 1;
            if entry.active {
                client.active_personnel += 1;
            }
            if entry.likes > 0 || entry.comments > 0 {
                client.personnel_with_likes += 1;
            }
            client.personnel.push(entry);
        }

        totals.total_likes += client.total_likes;
        totals.total_comments += client.total_comments;
        totals.total_personnel += client.total_personnel;
        totals.active_personnel += client.active_personnel;
        totals.personnel_with_likes += client.personnel_with_likes;

        top_personnel.extend(client.personnel.iter().cloned());
        clients.push(client);
    }

    totals.inactive_count = totals.total_personnel - totals.active_personnel;

    debug!(
        records = records.len(),
        clients = clients.len(),
        personnel = totals.total_personnel,
        "aggregated activity records"
    );

    AggregateResult {
        clients,
        totals,
        top_personnel,
    }
}

/// Register one record (or directory entry) under its client bucket,
/// max-merging when the identity was already seen for that client.
fn register(
    client_order: &mut Vec<String>,
    buckets: &mut HashMap<String, ClientBucket>,
    record: &Value,
    likes: u64,
    comments: u64,
) {
    if !record.is_object() {
        return;
    }

    let client_id = resolve_client_id(record);
    let scope = pick_str(record, SCOPE_PATHS)
        .or_else(|| pick_str(record, CLIENT_NAME_PATHS))
        .unwrap_or_default();
    let client_key = format!("{client_id}::{}", scope.to_uppercase());

    let bucket = buckets.entry(client_key.clone()).or_insert_with(|| {
        client_order.push(client_key.clone());
        ClientBucket {
            client_id,
            client_name: None,
            satfung: None,
            divisi: None,
            personnel_order: Vec::new(),
            personnel: HashMap::new(),
        }
    });
    if bucket.client_name.is_none() {
        bucket.client_name = pick_str(record, CLIENT_NAME_PATHS);
    }
    if bucket.satfung.is_none() {
        bucket.satfung = pick_str(record, SATFUNG_PATHS);
    }
    if bucket.divisi.is_none() {
        bucket.divisi = pick_str(record, DIVISI_PATHS);
    }

    let identity = resolve_personnel_identity(record);
    let personnel_key = format!("{client_key}::{identity}");

    match bucket.personnel.get_mut(&personnel_key) {
        Some(entry) => entry.absorb(likes, comments),
        None => {
            let nama = pick_str(record, NAME_PATHS)
                .or_else(|| pick_str(record, USERNAME_PATHS))
                .unwrap_or_else(|| UNNAMED.to_string());
            let mut entry = PersonnelAggregate::placeholder(personnel_key.clone(), nama);
            entry.username = pick_str(record, USERNAME_PATHS);
            entry.absorb(likes, comments);
            bucket.personnel_order.push(personnel_key.clone());
            bucket.personnel.insert(personnel_key, entry);
        }
    }
}

/// Whether a directory entry counts as active. Missing or unrecognized
/// status degrades to active, so nobody silently disappears.
pub fn directory_is_active(user: &Value) -> bool {
    match pick(user, ACTIVE_STATUS_PATHS) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(raw)) => !matches!(
            raw.trim().to_lowercase().as_str(),
            "nonaktif" | "non-aktif" | "inactive" | "false" | "0" | "tidak"
        ),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn directory_placeholder_survives_with_zero_activity() {
        let directory = vec![json!({"client_id": "CL-1", "satfung": "SAT LANTAS", "nama": "Budi", "user_id": "u1"})];
        let result = aggregate(&[], Some(&directory));
        assert_eq!(result.clients.len(), 1);
        let person = &result.clients[0].personnel[0];
        assert_eq!(person.likes, 0);
        assert_eq!(person.comments, 0);
        assert!(!person.active);
        assert_eq!(result.totals.inactive_count, 1);
    }

    #[test]
    fn activity_folds_onto_directory_seed() {
        let directory = vec![json!({"client_id": "CL-1", "satfung": "SAT LANTAS", "nama": "Budi", "user_id": "u1"})];
        let records = vec![
            json!({"client_id": "CL-1", "satfung": "SAT LANTAS", "user_id": "u1", "total_like": 5}),
            json!({"client_id": "CL-1", "satfung": "SAT LANTAS", "user_id": "u1", "total_like": 8, "total_komentar": 2}),
        ];
        let result = aggregate(&records, Some(&directory));
        assert_eq!(result.totals.total_personnel, 1);
        let person = &result.clients[0].personnel[0];
        assert_eq!(person.likes, 8, "max-merge, not 13");
        assert_eq!(person.comments, 2);
        assert!(person.active);
        assert_eq!(person.nama, "Budi", "seeded name is kept");
    }

    #[test]
    fn distinct_identities_sum_into_client_totals() {
        let records = vec![
            json!({"client_id": "CL-1", "user_id": "u1", "total_komentar": 4}),
            json!({"client_id": "CL-1", "user_id": "u2", "total_komentar": 3}),
        ];
        let result = aggregate(&records, None);
        assert_eq!(result.clients[0].total_comments, 7);
        assert_eq!(result.totals.total_comments, 7);
    }

    #[test]
    fn scope_splits_one_client_id_into_two_aggregates() {
        let records = vec![
            json!({"client_id": "CL-1", "satfung": "SAT LANTAS", "user_id": "u1"}),
            json!({"client_id": "CL-1", "satfung": "SAT INTEL", "user_id": "u2"}),
        ];
        let result = aggregate(&records, None);
        assert_eq!(result.clients.len(), 2);
    }

    #[test]
    fn client_name_falls_back_to_client_id() {
        let records = vec![json!({"client_id": "CL-9", "user_id": "u1"})];
        let result = aggregate(&records, None);
        assert_eq!(result.clients[0].client_name, "CL-9");
    }

    #[test]
    fn top_personnel_flattens_in_client_then_insertion_order() {
        let records = vec![
            json!({"client_id": "CL-1", "user_id": "u1", "nama": "A"}),
            json!({"client_id": "CL-2", "user_id": "u2", "nama": "B"}),
            json!({"client_id": "CL-1", "user_id": "u3", "nama": "C"}),
        ];
        let result = aggregate(&records, None);
        let names: Vec<&str> = result.top_personnel.iter().map(|p| p.nama.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn empty_input_yields_zeroed_totals() {
        let result = aggregate(&[], None);
        assert!(result.clients.is_empty());
        assert_eq!(result.totals, AggregateTotals::default());
    }

    // --- directory_is_active tests ---

    #[test]
    fn status_spellings_resolve() {
        assert!(directory_is_active(&json!({"status": "AKTIF"})));
        assert!(!directory_is_active(&json!({"status": "NONAKTIF"})));
        assert!(!directory_is_active(&json!({"is_active": false})));
        assert!(directory_is_active(&json!({"aktif": 1})));
        assert!(!directory_is_active(&json!({"aktif": 0})));
        assert!(directory_is_active(&json!({})), "missing status defaults to active");
    }
}
