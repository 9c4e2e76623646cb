//! Services module
//!
//! This module contains business logic services

pub mod broadcast;
pub mod notification;

pub use broadcast::{BroadcastReport, BroadcastService};
pub use notification::NotificationService;

use teloxide::Bot;

use crate::config::Settings;
use crate::storage::StorageService;

/// Service factory bundling storage and services for handler injection.
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub storage: StorageService,
    pub notification: NotificationService,
    pub broadcast: BroadcastService,
}

impl ServiceFactory {
    pub fn new(bot: Bot, settings: Settings, storage: StorageService) -> Self {
        let notification = NotificationService::new(bot, &settings.bot);
        let broadcast = BroadcastService::new(storage.broadcasts.clone(), &settings.broadcast);

        Self {
            settings,
            storage,
            notification,
            broadcast,
        }
    }

    /// Whether this user may use operator-only features (the configured
    /// operator account or any record in the admins collection).
    pub async fn is_operator(&self, user_id: i64) -> bool {
        user_id == self.settings.bot.admin_id || self.storage.admins.is_admin(user_id).await
    }
}
