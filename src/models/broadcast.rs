//! Broadcast audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed broadcast run. Append-only: records are never mutated
/// or deleted after being written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BroadcastRecord {
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub success_count: u32,
    pub failed_count: u32,
    pub status: BroadcastStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Completed,
}
