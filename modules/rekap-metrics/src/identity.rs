//! Identity normalization: stable keys for clients and personnel.
//!
//! Producers identify the same person with different key sets (NRP, email,
//! Instagram handle, bare name) and different casing/punctuation. Identity
//! resolution walks a priority-ordered fallback chain and normalizes the
//! winner so that `"Budi.Santoso"` and `"budi santoso"` key identically.

use serde_json::Value;
use uuid::Uuid;

use crate::fields::pick_str;

/// Sentinel client id for records with no resolvable client.
pub const FALLBACK_CLIENT_ID: &str = "LAINNYA";

const CLIENT_ID_PATHS: &[&str] = &[
    "client_id",
    "clientId",
    "clientID",
    "rekap.client_id",
    "rekap.clientId",
    "rekap.clientID",
];

/// Priority-ordered identity fields. Top-level only.
const IDENTITY_PATHS: &[&str] = &[
    "user_id",
    "nrp",
    "nip",
    "email",
    "username",
    "instagram_username",
    "nama",
];

/// Lowercase and strip whitespace, `.`, `_`, `-` and stray commas, so
/// spelling variants of one identifier collapse to the same key.
/// Empty input yields an empty string, never `None`.
pub fn normalize_identifier(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '_' | '-' | ','))
        .collect()
}

/// Resolve the owning client id, falling back to [`FALLBACK_CLIENT_ID`].
pub fn resolve_client_id(record: &Value) -> String {
    pick_str(record, CLIENT_ID_PATHS).unwrap_or_else(|| FALLBACK_CLIENT_ID.to_string())
}

/// Resolve a person's identity key: first non-empty normalized identifier
/// in the fallback chain, else a random opaque token.
///
/// GAP: some producers nest identity under a `personil` sub-object; those
/// records fall through to the random token, so the same person arriving
/// from two such producers counts as two people. Downstream totals are
/// tuned to this counting — the probe list stays top-level on purpose.
pub fn resolve_personnel_identity(record: &Value) -> String {
    for path in IDENTITY_PATHS {
        if let Some(raw) = pick_str(record, &[path]) {
            let normalized = normalize_identifier(&raw);
            if !normalized.is_empty() {
                return normalized;
            }
        }
    }
    format!("anon{}", Uuid::new_v4().simple())
}
