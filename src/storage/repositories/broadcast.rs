//! Broadcast history repository

use chrono::Utc;
use tracing::info;

use crate::models::broadcast::{BroadcastRecord, BroadcastStatus};
use crate::storage::json_store::JsonStore;

/// Append-only audit log of completed broadcasts.
#[derive(Debug, Clone)]
pub struct BroadcastRepository {
    store: JsonStore,
}

impl BroadcastRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Append one record, stamping timestamp and status.
    pub async fn append(&self, text: &str, success_count: u32, failed_count: u32) {
        let mut records: Vec<BroadcastRecord> = self.store.load().await;

        records.push(BroadcastRecord {
            text: text.to_string(),
            sent_at: Utc::now(),
            success_count,
            failed_count,
            status: BroadcastStatus::Completed,
        });

        info!(success = success_count, failed = failed_count, "Broadcast recorded");
        self.store.save(&records).await;
    }

    /// Full broadcast history in append order.
    pub async fn history(&self) -> Vec<BroadcastRecord> {
        self.store.load().await
    }
}
