//! Operator panel and broadcast handlers
//!
//! Everything here is gated on the configured operator account (plus any
//! extra admins in the admins collection). Non-operators get an
//! access-denied notice and no state change.

use std::collections::BTreeMap;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use tracing::{debug, warn};

use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

const PANEL_TEXT: &str = "Operator panel:";
const ACCESS_DENIED: &str = "This command is available to the operator only.";

/// Handle /admin - show the operator panel.
pub async fn handle_admin_panel(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    if !services.is_operator(user_id).await {
        debug!(user_id = user_id, "Admin panel refused");
        return Ok(());
    }

    bot.send_message(msg.chat.id, PANEL_TEXT)
        .reply_markup(keyboards::admin_panel())
        .await?;
    Ok(())
}

/// Handle /broadcast - confirmation step before the fan-out prompt.
pub async fn handle_broadcast_command(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    if !services.is_operator(user_id).await {
        bot.send_message(msg.chat.id, ACCESS_DENIED).await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Yes, continue", "broadcast_confirm"),
        InlineKeyboardButton::callback("Cancel", "broadcast_cancel"),
    ]]);

    bot.send_message(
        msg.chat.id,
        "⚠️ You are about to message every registered user. Continue?",
    )
    .reply_markup(keyboard)
    .await?;
    Ok(())
}

/// Prompt for the broadcast text and enter the waiting state.
pub async fn handle_broadcast_prompt(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if !services.is_operator(user_id).await {
        bot.send_message(chat_id, "Access denied").await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "❌ Cancel",
        "admin:back",
    )]]);

    bot.send_message(chat_id, "📢 Enter the message to broadcast:")
        .reply_markup(keyboard)
        .await?;
    state_storage
        .set(user_id, ConversationState::AwaitingBroadcast)
        .await;
    Ok(())
}

/// Run the fan-out with the operator's message text.
///
/// Sequential sends with a fixed pacing delay, a progress edit every Nth
/// success, one appended audit record, and a final tally report. The
/// waiting state is reset unconditionally at the end.
pub async fn handle_broadcast_message(
    bot: Bot,
    msg: Message,
    text: &str,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if !services.is_operator(user_id).await {
        warn!(user_id = user_id, "Broadcast text from non-operator dropped");
        state_storage.clear(user_id).await;
        return Ok(());
    }

    let users = services.storage.users.list().await;
    if users.is_empty() {
        bot.send_message(chat_id, "❌ No users to broadcast to").await?;
        state_storage.clear(user_id).await;
        return Ok(());
    }

    log_admin_action(user_id, "broadcast", Some(text));

    let progress_msg = bot.send_message(chat_id, "🔄 Starting broadcast...").await?;

    let send_bot = bot.clone();
    let body = text.to_string();
    let progress_bot = bot.clone();
    let progress_id = progress_msg.id;

    let report = services
        .broadcast
        .broadcast(
            text,
            &users,
            move |user| {
                let bot = send_bot.clone();
                let body = body.clone();
                let target = ChatId(user.id);
                async move {
                    bot.send_message(target, body).await?;
                    Ok(())
                }
            },
            move |sent, total| {
                let bot = progress_bot.clone();
                async move {
                    let _ = bot
                        .edit_message_text(chat_id, progress_id, format!("⏳ Sent: {}/{}", sent, total))
                        .await;
                }
            },
        )
        .await;

    if let Err(e) = bot.delete_message(chat_id, progress_msg.id).await {
        warn!(error = %e, "Failed to delete broadcast progress message");
    }

    let summary = format!(
        "✅ Broadcast finished:\n\n▪️ Delivered: {}\n▪️ Failed: {}\n▪️ Total users: {}",
        report.success, report.failed, report.total,
    );
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "⬅️ Back to panel",
        "admin:back",
    )]]);

    bot.send_message(chat_id, summary)
        .reply_markup(keyboard)
        .await?;
    state_storage.clear(user_id).await;
    Ok(())
}

/// Route `admin:*` callbacks.
pub async fn handle_admin_callback(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    action: &str,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if !services.is_operator(user_id).await {
        bot.send_message(chat_id, "Access denied").await?;
        return Ok(());
    }

    match action.split_once(':') {
        None if action == "back" => {
            state_storage.clear(user_id).await;
            bot.send_message(chat_id, PANEL_TEXT)
                .reply_markup(keyboards::admin_panel())
                .await?;
        }
        None if action == "bookings" => show_all_bookings(bot, chat_id, services).await?,
        None if action == "users" => show_all_users(bot, chat_id, services).await?,
        None if action == "broadcast" => {
            handle_broadcast_prompt(bot, chat_id, user_id, services, state_storage).await?
        }
        Some(("profile", id)) => {
            if let Ok(target_id) = id.parse::<i64>() {
                show_user_profile(bot, chat_id, target_id, services).await?;
            }
        }
        Some(("user_bookings", id)) => {
            if let Ok(target_id) = id.parse::<i64>() {
                show_user_bookings(bot, chat_id, target_id, services).await?;
            }
        }
        _ => debug!(action = action, "Unknown admin callback dropped"),
    }

    Ok(())
}

/// All bookings grouped by time slot.
async fn show_all_bookings(bot: Bot, chat_id: ChatId, services: ServiceFactory) -> Result<()> {
    let bookings = services.storage.bookings.list().await;

    if bookings.is_empty() {
        bot.send_message(chat_id, "No active bookings").await?;
        return Ok(());
    }

    let mut by_slot: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for booking in &bookings {
        by_slot
            .entry(booking.time_slot.clone())
            .or_default()
            .push(booking.user_id);
    }

    let mut text = String::from("📋 All class bookings:\n\n");
    for (slot, user_ids) in by_slot {
        text.push_str(&format!("🕒 {}:\n", slot));
        for (i, booked_id) in user_ids.iter().enumerate() {
            let name = services
                .storage
                .users
                .get(*booked_id)
                .await
                .map(|u| u.name)
                .unwrap_or_else(|| "Unknown".to_string());
            text.push_str(&format!("{}. {} (ID: {})\n", i + 1, name, booked_id));
        }
        text.push('\n');
    }

    bot.send_message(chat_id, text)
        .reply_markup(keyboards::admin_list_nav("admin:bookings"))
        .await?;
    Ok(())
}

/// All registered users, with handles resolved through the transport.
async fn show_all_users(bot: Bot, chat_id: ChatId, services: ServiceFactory) -> Result<()> {
    let users = services.storage.users.list().await;

    if users.is_empty() {
        bot.send_message(chat_id, "No registered users").await?;
        return Ok(());
    }

    let mut text = String::from("👥 All users:\n\n");
    for (i, user) in users.iter().enumerate() {
        let handle = match bot.get_chat(ChatId(user.id)).await {
            Ok(chat) => chat
                .username()
                .map(|u| format!("@{}", u))
                .unwrap_or_else(|| "no username".to_string()),
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Failed to resolve user handle");
                "unavailable".to_string()
            }
        };

        text.push_str(&format!(
            "{}. {} {}\n   👤 {} 📱 {} 🆔 {}\n   📅 {}\n\n",
            i + 1,
            user.name,
            user.surname,
            handle,
            user.phone,
            user.id,
            user.registered_at.format("%d-%m-%Y %H:%M"),
        ));
    }

    bot.send_message(chat_id, text)
        .reply_markup(keyboards::admin_list_nav("admin:users"))
        .await?;
    Ok(())
}

/// One user's profile, reachable from the registration notice.
async fn show_user_profile(
    bot: Bot,
    chat_id: ChatId,
    target_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let Some(user) = services.storage.users.get(target_id).await else {
        bot.send_message(chat_id, "User not found").await?;
        return Ok(());
    };

    let text = format!(
        "👤 User profile\n\n🆔 ID: {}\n{}\n📅 Registered: {}",
        target_id,
        user.profile_text(),
        user.registered_at.format("%d-%m-%Y %H:%M"),
    );
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "📅 Bookings",
        format!("admin:user_bookings:{}", target_id),
    )]]);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// One user's bookings, reachable from the profile view.
async fn show_user_bookings(
    bot: Bot,
    chat_id: ChatId,
    target_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let bookings = services.storage.bookings.for_user(target_id).await;

    if bookings.is_empty() {
        bot.send_message(chat_id, "This user has no bookings").await?;
        return Ok(());
    }

    let mut text = String::from("📅 User bookings\n\n");
    for (i, booking) in bookings.iter().enumerate() {
        text.push_str(&format!(
            "{}. 🕒 {}\n   📅 Booked: {}\n\n",
            i + 1,
            booking.time_slot,
            booking.created_at.format("%d-%m-%Y %H:%M"),
        ));
    }

    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "⬅️ Back",
        format!("admin:profile:{}", target_id),
    )]]);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}
