//! Profile view and the profile-edit wizard
//!
//! Two steps: pick a field, then type the new value. Cancel is available
//! from either step and commits nothing.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use tracing::debug;

use crate::handlers::keyboards;
use crate::models::user::{ProfileField, UserPatch};
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;

const NOT_REGISTERED: &str = "❌ You are not registered yet!";

/// "My profile" menu button.
pub async fn show_profile(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let Some(user) = services.storage.users.get(user_id).await else {
        bot.send_message(chat_id, NOT_REGISTERED)
            .reply_markup(keyboards::menu_reply())
            .await?;
        return Ok(());
    };

    let text = format!(
        "👤 Your profile:\n\n{}\n📅 Registered: {}",
        user.profile_text(),
        user.registered_at.format("%d-%m-%Y %H:%M"),
    );
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("✏️ Edit profile", "edit_profile")],
        vec![InlineKeyboardButton::callback("⬅️ Back", "menu")],
    ]);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Enter the profile-edit wizard at the field-selection step.
pub async fn handle_edit_entry(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if services.storage.users.get(user_id).await.is_none() {
        bot.send_message(chat_id, NOT_REGISTERED)
            .reply_markup(keyboards::menu_reply())
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, "✏️ Choose a field to edit:")
        .reply_markup(keyboards::edit_fields())
        .await?;
    state_storage
        .set(user_id, ConversationState::ChoosingEditField)
        .await;
    Ok(())
}

/// Field picked; ask for the new value.
pub async fn handle_field_chosen(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    field_token: &str,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(field) = ProfileField::parse(field_token) else {
        debug!(field = field_token, "Unknown edit field dropped");
        return Ok(());
    };

    bot.send_message(chat_id, format!("Enter a new value for {}:", field.prompt()))
        .reply_markup(keyboards::edit_cancel())
        .await?;
    state_storage
        .set(user_id, ConversationState::AwaitingFieldValue { field })
        .await;
    Ok(())
}

/// New value received; replace the field and report the updated profile.
pub async fn handle_new_value(
    bot: Bot,
    msg: Message,
    text: &str,
    field: ProfileField,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let patch = UserPatch::single(field, text.to_string());
    let updated = services.storage.users.update(user_id, patch).await;

    if updated {
        match services.storage.users.get(user_id).await {
            Some(user) => {
                bot.send_message(
                    chat_id,
                    format!("✅ Profile updated!\n\n{}", user.profile_text()),
                )
                .reply_markup(keyboards::menu_reply())
                .await?;
            }
            None => {
                bot.send_message(chat_id, "✅ Profile updated.")
                    .reply_markup(keyboards::menu_reply())
                    .await?;
            }
        }
    } else {
        bot.send_message(chat_id, "❌ Error: user not found!")
            .reply_markup(keyboards::menu_reply())
            .await?;
    }

    state_storage.clear(user_id).await;
    Ok(())
}

/// Cancel from either edit step; commits nothing.
pub async fn handle_edit_cancel(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state_storage: StateStorage,
) -> Result<()> {
    bot.send_message(chat_id, "Profile editing cancelled.")
        .reply_markup(keyboards::menu_reply())
        .await?;
    state_storage.clear(user_id).await;
    Ok(())
}
