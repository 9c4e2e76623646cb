//! Booking repository implementation

use chrono::Utc;
use tracing::{info, warn};

use crate::models::booking::Booking;
use crate::storage::json_store::JsonStore;

/// CRUD over the bookings collection. The (user id, time slot) pair is the
/// uniqueness key; there is deliberately no per-slot capacity limit.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    store: JsonStore,
}

impl BookingRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// List all bookings in insertion order.
    pub async fn list(&self) -> Vec<Booking> {
        self.store.load().await
    }

    /// List the bookings held by one user.
    pub async fn for_user(&self, user_id: i64) -> Vec<Booking> {
        self.list()
            .await
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect()
    }

    /// Append a booking unless the (user id, slot) pair already exists.
    pub async fn add(&self, user_id: i64, time_slot: &str) -> bool {
        let mut bookings = self.list().await;

        if bookings
            .iter()
            .any(|b| b.user_id == user_id && b.time_slot == time_slot)
        {
            warn!(user_id = user_id, time_slot = time_slot, "Duplicate booking rejected");
            return false;
        }

        info!(user_id = user_id, time_slot = time_slot, "Adding booking");
        bookings.push(Booking {
            user_id,
            time_slot: time_slot.to_string(),
            created_at: Utc::now(),
        });
        self.store.save(&bookings).await;
        true
    }

    /// Remove every booking matching the (user id, slot) pair.
    ///
    /// Structurally at most one record matches. Persists only when
    /// something was removed; returns false otherwise.
    pub async fn cancel(&self, user_id: i64, time_slot: &str) -> bool {
        let bookings = self.list().await;
        let initial_count = bookings.len();

        let remaining: Vec<Booking> = bookings
            .into_iter()
            .filter(|b| !(b.user_id == user_id && b.time_slot == time_slot))
            .collect();

        if remaining.len() < initial_count {
            info!(user_id = user_id, time_slot = time_slot, "Booking cancelled");
            self.store.save(&remaining).await;
            true
        } else {
            false
        }
    }
}
