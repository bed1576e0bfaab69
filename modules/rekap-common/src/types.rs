use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// --- Personnel / client aggregates ---

/// One person's deduplicated engagement within a single aggregation run.
///
/// Identity-unique per run. Later observations of the same identity are
/// folded in with [`PersonnelAggregate::absorb`], which takes the maximum
/// per metric so overlapping producer exports never double-count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelAggregate {
    pub key: String,
    pub nama: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub likes: u64,
    pub comments: u64,
    pub interactions: u64,
    pub active: bool,
}

impl PersonnelAggregate {
    /// A zero-activity entry, as seeded from a personnel directory.
    pub fn placeholder(key: impl Into<String>, nama: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            nama: nama.into(),
            username: None,
            likes: 0,
            comments: 0,
            interactions: 0,
            active: false,
        }
    }

    /// Fold another observation of the same identity: per-metric maximum,
    /// never addition, then recompute the derived fields.
    pub fn absorb(&mut self, likes: u64, comments: u64) {
        self.likes = self.likes.max(likes);
        self.comments = self.comments.max(comments);
        self.interactions = self.likes + self.comments;
        self.active = self.likes > 0 || self.comments > 0;
    }
}

/// Per-client roll-up over its deduplicated personnel.
///
/// Totals here are sums across distinct personnel identities — the one
/// place addition is correct, because each identity is already max-merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAggregate {
    pub key: String,
    pub client_id: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satfung: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisi: Option<String>,
    pub personnel: Vec<PersonnelAggregate>,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_personnel: u64,
    pub active_personnel: u64,
    pub personnel_with_likes: u64,
}

impl ClientAggregate {
    /// Fraction of this client's personnel with any activity.
    /// 0.0 when the roster is empty.
    pub fn activity_ratio(&self) -> f64 {
        if self.total_personnel == 0 {
            0.0
        } else {
            self.active_personnel as f64 / self.total_personnel as f64
        }
    }

    /// Fraction of this client's personnel that produced engagement,
    /// i.e. compliance with the engagement mandate.
    pub fn compliance_ratio(&self) -> f64 {
        if self.total_personnel == 0 {
            0.0
        } else {
            self.personnel_with_likes as f64 / self.total_personnel as f64
        }
    }
}

/// Cross-client sums for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotals {
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_personnel: u64,
    pub active_personnel: u64,
    pub personnel_with_likes: u64,
    pub inactive_count: u64,
}

/// Full output of one aggregation run. Pure data, JSON-serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub clients: Vec<ClientAggregate>,
    pub totals: AggregateTotals,
    pub top_personnel: Vec<PersonnelAggregate>,
}

// --- Canonical merged activity record ---

/// Canonical per-(client, person) activity record produced by the merger.
///
/// The raw streams arrive as loose mappings with producer-specific field
/// spellings; the merger folds them into this explicit shape so the set of
/// supported inputs stays auditable in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub client_id: String,
    pub client_name: Option<String>,
    pub satfung: Option<String>,
    pub divisi: Option<String>,
    pub identity: String,
    pub nama: String,
    pub username: Option<String>,
    pub likes: u64,
    pub comments: u64,
}

impl MergedRecord {
    /// Re-flatten to the canonical loose-record spelling the aggregation
    /// engine probes, so it keeps a single `Value`-based entry point.
    pub fn into_value(self) -> Value {
        let mut record = json!({
            "client_id": self.client_id,
            "user_id": self.identity,
            "nama": self.nama,
            "total_like": self.likes,
            "total_komentar": self.comments,
        });
        if let Some(obj) = record.as_object_mut() {
            if let Some(name) = self.client_name {
                obj.insert("nama_client".into(), Value::String(name));
            }
            if let Some(satfung) = self.satfung {
                obj.insert("satfung".into(), Value::String(satfung));
            }
            if let Some(divisi) = self.divisi {
                obj.insert("divisi".into(), Value::String(divisi));
            }
            if let Some(username) = self.username {
                obj.insert("username".into(), Value::String(username));
            }
        }
        record
    }
}

// --- Weekly trend series ---

/// One fixed calendar-week window, inclusive on both bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRange {
    pub key: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Summed metrics for one week window. Always emitted, zero-filled when no
/// record falls inside, so trend series stay contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    pub key: String,
    pub label: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub interactions: u64,
    pub posts: u64,
}

impl WeeklyBucket {
    pub fn empty(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            likes: 0,
            comments: 0,
            shares: 0,
            interactions: 0,
            posts: 0,
        }
    }
}

// --- Canonical platform post ---

/// Engagement metrics of one platform post, each clamped to ≥0 at
/// extraction time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetrics {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub interactions: u64,
}

/// A platform post of unknown upstream shape, normalized into one canonical
/// record. Platform-specific exports (Instagram, TikTok, …) all map here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPost {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub platform: String,
    pub published_at: Option<DateTime<Utc>>,
    pub metrics: PostMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_takes_per_metric_maximum() {
        let mut person = PersonnelAggregate::placeholder("k", "Budi");
        person.absorb(5, 1);
        person.absorb(3, 4);
        assert_eq!(person.likes, 5);
        assert_eq!(person.comments, 4);
        assert_eq!(person.interactions, 9);
        assert!(person.active);
    }

    #[test]
    fn placeholder_starts_inactive() {
        let person = PersonnelAggregate::placeholder("k", "Budi");
        assert!(!person.active);
        assert_eq!(person.interactions, 0);
    }

    #[test]
    fn ratios_handle_empty_rosters() {
        let client = ClientAggregate {
            key: "CL-1::".into(),
            client_id: "CL-1".into(),
            client_name: "CL-1".into(),
            satfung: None,
            divisi: None,
            personnel: Vec::new(),
            total_likes: 0,
            total_comments: 0,
            total_personnel: 0,
            active_personnel: 0,
            personnel_with_likes: 0,
        };
        assert_eq!(client.activity_ratio(), 0.0);
        assert_eq!(client.compliance_ratio(), 0.0);
    }

    #[test]
    fn merged_record_reflattens_to_canonical_spellings() {
        let record = MergedRecord {
            client_id: "CL-1".into(),
            client_name: Some("Polres Metro".into()),
            satfung: None,
            divisi: None,
            identity: "u1".into(),
            nama: "Budi".into(),
            username: Some("budi".into()),
            likes: 8,
            comments: 3,
        };
        let value = record.into_value();
        assert_eq!(value["client_id"], "CL-1");
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["total_like"], 8);
        assert_eq!(value["total_komentar"], 3);
        assert_eq!(value["nama_client"], "Polres Metro");
        assert!(value.get("satfung").is_none());
    }
}
