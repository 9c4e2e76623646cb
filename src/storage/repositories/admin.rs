//! Admin repository implementation

use chrono::Utc;
use tracing::info;

use crate::models::admin::Admin;
use crate::storage::json_store::JsonStore;

/// Additional administrators beyond the configured operator account.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    store: JsonStore,
}

impl AdminRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Admin> {
        self.store.load().await
    }

    pub async fn is_admin(&self, user_id: i64) -> bool {
        self.list().await.iter().any(|a| a.admin_id == user_id)
    }

    /// Append an admin unless the id is already present.
    pub async fn add(&self, admin_id: i64, display_name: &str, permissions: Vec<String>) -> bool {
        let mut admins = self.list().await;

        if admins.iter().any(|a| a.admin_id == admin_id) {
            return false;
        }

        info!(admin_id = admin_id, "Adding admin");
        admins.push(Admin {
            admin_id,
            display_name: display_name.to_string(),
            added_at: Utc::now(),
            permissions,
        });
        self.store.save(&admins).await;
        true
    }

    /// Remove an admin by id; returns false when no record matched.
    pub async fn remove(&self, admin_id: i64) -> bool {
        let admins = self.list().await;
        let initial_count = admins.len();

        let remaining: Vec<Admin> = admins
            .into_iter()
            .filter(|a| a.admin_id != admin_id)
            .collect();

        if remaining.len() < initial_count {
            self.store.save(&remaining).await;
            true
        } else {
            false
        }
    }

    pub async fn permissions(&self, admin_id: i64) -> Vec<String> {
        self.list()
            .await
            .into_iter()
            .find(|a| a.admin_id == admin_id)
            .map(|a| a.permissions)
            .unwrap_or_default()
    }
}
