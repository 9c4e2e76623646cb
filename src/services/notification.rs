//! Operator notification service
//!
//! Sends registration, booking and cancellation notices to the operator
//! account and forwards support messages with a reply shortcut. Notices
//! are best-effort: a failed send is logged and never fails the flow that
//! triggered it. Support forwarding is the exception, its outcome is
//! reported back so the handler can tell the user.

use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;

use crate::config::BotConfig;
use crate::models::user::User;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    admin_id: i64,
    cancel_notify_id: i64,
}

impl NotificationService {
    pub fn new(bot: Bot, config: &BotConfig) -> Self {
        Self {
            bot,
            admin_id: config.admin_id,
            cancel_notify_id: config.cancel_notify_id.unwrap_or(config.admin_id),
        }
    }

    /// Notify the operator about a completed registration.
    pub async fn notify_registration(&self, user: &User) {
        let text = format!(
            "🆕 New user registered!\n\n{}\n🆔 ID: {}\n📅 Registered: {}",
            user.profile_text(),
            user.id,
            user.registered_at.format("%d-%m-%Y %H:%M"),
        );

        let keyboard = registration_actions(user.id);

        if let Err(e) = self
            .bot
            .send_message(ChatId(self.admin_id), text)
            .reply_markup(keyboard)
            .await
        {
            warn!(user_id = user.id, error = %e, "Failed to notify operator about registration");
        }
    }

    /// Notify the operator about a new booking.
    pub async fn notify_booking(&self, user: &User, time_slot: &str) {
        let text = format!(
            "📝 New class booking:\n\n👤 User: {}\n📱 Phone: {}\n🕒 Time: {}",
            user.name, user.phone, time_slot,
        );

        if let Err(e) = self.bot.send_message(ChatId(self.admin_id), text).await {
            warn!(user_id = user.id, error = %e, "Failed to notify operator about booking");
        }
    }

    /// Notify the cancellation recipient about a cancelled booking.
    pub async fn notify_cancellation(&self, user: &User, time_slot: &str) {
        let text = format!(
            "❌ Booking cancelled:\n\n👤 User: {}\n📱 Phone: {}\n🕒 Time: {}",
            user.name, user.phone, time_slot,
        );

        if let Err(e) = self
            .bot
            .send_message(ChatId(self.cancel_notify_id), text)
            .await
        {
            warn!(user_id = user.id, error = %e, "Failed to notify about cancellation");
        }
    }

    /// Forward a support message to the operator with a reply shortcut.
    ///
    /// Unlike the notices above, the outcome is propagated so the caller
    /// can report a generic failure to the user.
    pub async fn forward_support(
        &self,
        from_id: i64,
        from_handle: Option<&str>,
        sent_at: DateTime<Utc>,
        text: &str,
    ) -> Result<()> {
        let body = format!(
            "📨 New support message:\n\n👤 User: @{}\n🆔 ID: {}\n📅 Date: {}\n\n✉️ Message:\n{}",
            from_handle.unwrap_or("no username"),
            from_id,
            sent_at.format("%d-%m-%Y %H:%M"),
            text,
        );

        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "Reply to user",
            format!("reply:{}", from_id),
        )]]);

        self.bot
            .send_message(ChatId(self.admin_id), body)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    /// Deliver the operator's reply to a support message.
    pub async fn reply_to_user(&self, target_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(target_id), format!("📩 Reply from support:\n\n{}", text))
            .await?;
        Ok(())
    }
}

/// Inline actions attached to a registration notice. The deep-link button
/// is included only when the url parses.
fn registration_actions(user_id: i64) -> InlineKeyboardMarkup {
    let mut row = Vec::new();
    if let Ok(url) = format!("tg://user?id={}", user_id).parse() {
        row.push(InlineKeyboardButton::url("💬 Message user", url));
    }
    row.push(InlineKeyboardButton::callback(
        "📋 Profile",
        format!("admin:profile:{}", user_id),
    ));
    InlineKeyboardMarkup::new(vec![row])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_actions_carry_both_buttons() {
        let keyboard = registration_actions(42);
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "💬 Message user");
        assert_eq!(keyboard.inline_keyboard[0][1].text, "📋 Profile");
    }
}
