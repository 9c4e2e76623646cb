//! Record store: flat-file persistence for users, bookings, broadcasts
//! and admins.

pub mod json_store;
pub mod repositories;

use std::path::Path;

pub use json_store::JsonStore;
pub use repositories::{AdminRepository, BookingRepository, BroadcastRepository, UserRepository};

use crate::config::StorageConfig;

/// Bundle of the four collection repositories.
#[derive(Debug, Clone)]
pub struct StorageService {
    pub users: UserRepository,
    pub bookings: BookingRepository,
    pub broadcasts: BroadcastRepository,
    pub admins: AdminRepository,
}

impl StorageService {
    /// Build repositories rooted at the configured data directory and
    /// seed any missing collection files.
    pub async fn new(config: &StorageConfig) -> Self {
        Self::at_dir(Path::new(&config.data_dir)).await
    }

    pub async fn at_dir(dir: &Path) -> Self {
        let users_store = JsonStore::new(dir.join("users.json"));
        let bookings_store = JsonStore::new(dir.join("bookings.json"));
        let broadcasts_store = JsonStore::new(dir.join("broadcasts.json"));
        let admins_store = JsonStore::new(dir.join("admins.json"));

        for store in [&users_store, &bookings_store, &broadcasts_store, &admins_store] {
            store.ensure_exists().await;
        }

        Self {
            users: UserRepository::new(users_store),
            bookings: BookingRepository::new(bookings_store),
            broadcasts: BroadcastRepository::new(broadcasts_store),
            admins: AdminRepository::new(admins_store),
        }
    }
}
