//! Admin model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An additional administrator beyond the configured operator account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    #[serde(deserialize_with = "super::flexible_i64")]
    pub admin_id: i64,
    pub display_name: String,
    pub added_at: DateTime<Utc>,
    pub permissions: Vec<String>,
}
