use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved analysis summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub score: Option<u8>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of POST /api/v1/history.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHistoryRecord {
    pub score: Option<u8>,
    #[serde(default)]
    pub skills: Vec<String>,
}
