//! In-memory conversation state storage
//!
//! States live in a process-local map keyed by user id. They are
//! deliberately not persisted: a restart drops any wizard in progress and
//! the user re-triggers the entry action.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::context::ConversationState;

/// Shared map of user id to conversation state.
#[derive(Debug, Clone, Default)]
pub struct StateStorage {
    states: Arc<RwLock<HashMap<i64, ConversationState>>>,
}

impl StateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a user; `Idle` when none is recorded.
    pub async fn load(&self, user_id: i64) -> ConversationState {
        self.states
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the user's state. Entering a wizard this way abandons any
    /// other pending wizard for that user without warning.
    pub async fn set(&self, user_id: i64, state: ConversationState) {
        debug!(user_id = user_id, state = state.describe(), "State transition");
        self.states.write().await.insert(user_id, state);
    }

    /// Reset the user to idle.
    pub async fn clear(&self, user_id: i64) {
        debug!(user_id = user_id, "State cleared");
        self.states.write().await.remove(&user_id);
    }

    /// Number of users with a non-idle wizard in flight.
    pub async fn active_count(&self) -> usize {
        self.states
            .read()
            .await
            .values()
            .filter(|s| !s.is_idle())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::context::ConversationState;

    #[tokio::test]
    async fn test_unknown_user_is_idle() {
        let storage = StateStorage::new();
        assert!(storage.load(1).await.is_idle());
    }

    #[tokio::test]
    async fn test_set_load_clear() {
        let storage = StateStorage::new();
        storage.set(1, ConversationState::AwaitingSupportMessage).await;
        assert_eq!(
            storage.load(1).await,
            ConversationState::AwaitingSupportMessage
        );

        storage.clear(1).await;
        assert!(storage.load(1).await.is_idle());
    }

    #[tokio::test]
    async fn test_last_entry_wins() {
        let storage = StateStorage::new();
        storage.set(1, ConversationState::start_registration()).await;
        storage.set(1, ConversationState::ChoosingTime).await;
        assert_eq!(storage.load(1).await, ConversationState::ChoosingTime);
    }

    #[tokio::test]
    async fn test_active_count_ignores_idle() {
        let storage = StateStorage::new();
        storage.set(1, ConversationState::Idle).await;
        storage.set(2, ConversationState::ChoosingTime).await;
        assert_eq!(storage.active_count().await, 1);
    }
}
