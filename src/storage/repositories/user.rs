//! User repository implementation

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::user::{NewUser, User, UserPatch};
use crate::storage::json_store::JsonStore;

/// CRUD over the users collection. Every operation is a linear scan over
/// the whole file; persistence failures never surface to callers.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: JsonStore,
}

impl UserRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// List all users in insertion order. Never fails: an unreadable
    /// backing file yields an empty list.
    pub async fn list(&self) -> Vec<User> {
        self.store.load().await
    }

    /// Find a user by id.
    pub async fn get(&self, id: i64) -> Option<User> {
        self.list().await.into_iter().find(|u| u.id == id)
    }

    /// Append a new user unless one with the same id already exists.
    ///
    /// Stamps the registration timestamp server-side. Returns false when
    /// the id is already taken; the collection is left unchanged.
    pub async fn add(&self, new_user: NewUser) -> bool {
        let mut users = self.list().await;

        if users.iter().any(|u| u.id == new_user.id) {
            warn!(user_id = new_user.id, "User already exists, rejecting registration");
            return false;
        }

        let user = User {
            id: new_user.id,
            name: new_user.name,
            surname: new_user.surname,
            phone: new_user.phone,
            email: new_user.email,
            category: new_user.category,
            registered_at: Utc::now(),
        };

        info!(user_id = user.id, "Adding new user");
        users.push(user);
        self.store.save(&users).await;
        true
    }

    /// Merge a partial update into the first record matching `id`.
    ///
    /// Returns false (and does not touch the file) when no record matches.
    pub async fn update(&self, id: i64, patch: UserPatch) -> bool {
        let mut users = self.list().await;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            debug!(user_id = id, "Update skipped, user not found");
            return false;
        };

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(surname) = patch.surname {
            user.surname = surname;
        }
        if let Some(phone) = patch.phone {
            user.phone = phone;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(category) = patch.category {
            user.category = category;
        }

        self.store.save(&users).await;
        true
    }
}
