// src/types/reclamation.rs
//! User-submitted complaints and their statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclamationStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reclamation {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: Option<String>,
    pub description: String,
    pub status: Option<ReclamationStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReclamationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReclamationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReclamationStatus>,
}

/// Which aggregate `/reclamations/stats/{kind}` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
    Types,
    Status,
}

impl StatsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatsKind::Types => "types",
            StatsKind::Status => "status",
        }
    }
}

impl fmt::Display for StatsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bucket of a stats aggregate, e.g. `{"_id": "technique", "count": 4}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBucket {
    #[serde(rename = "_id", alias = "key")]
    pub key: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReclamationStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let req = UpdateReclamationRequest {
            status: Some(ReclamationStatus::Resolved),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"status": "resolved"})
        );
    }

    #[test]
    fn test_stat_bucket() {
        let buckets: Vec<StatBucket> =
            serde_json::from_str(r#"[{"_id":"technique","count":4},{"_id":"paiement","count":1}]"#)
                .unwrap();
        assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), 5);
    }
}
