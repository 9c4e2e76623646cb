//! Registration wizard
//!
//! Five free-text steps (name, surname, phone, email, skill level), no
//! validation and no back-navigation. The terminal step commits the user
//! and notifies the operator; every exit resets the state to idle.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use tracing::{info, warn};

use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::state::{ConversationState, RegistrationDraft, RegistrationStep, StateStorage};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Entry point for the "Register" menu button.
///
/// Already-registered users are short-circuited to their profile with an
/// edit shortcut; no wizard state is entered for them.
pub async fn handle_registration_entry(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if let Some(existing) = services.storage.users.get(user_id).await {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "Edit profile",
            "edit_profile",
        )]]);

        bot.send_message(
            chat_id,
            format!("❌ You are already registered!\n\nYour details:\n{}", existing.profile_text()),
        )
        .reply_markup(keyboard)
        .await?;
        return Ok(());
    }

    log_user_action(user_id, "registration_started", None);
    bot.send_message(chat_id, RegistrationStep::Name.prompt()).await?;
    state_storage
        .set(user_id, ConversationState::start_registration())
        .await;
    Ok(())
}

/// Consume one free-text answer and advance the wizard.
pub async fn handle_registration_step(
    bot: Bot,
    msg: Message,
    text: &str,
    step: RegistrationStep,
    mut draft: RegistrationDraft,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    draft.record(step, text);

    if let Some(next) = step.next() {
        bot.send_message(chat_id, next.prompt()).await?;
        state_storage
            .set(user_id, ConversationState::Registration { step: next, draft })
            .await;
        return Ok(());
    }

    // Terminal step: commit
    let Some(new_user) = draft.into_new_user(user_id) else {
        // A partially filled draft at the terminal step means the wizard
        // state was corrupted somehow; report and reset.
        warn!(user_id = user_id, "Registration draft incomplete at commit");
        bot.send_message(chat_id, "❌ Something went wrong, please register again.")
            .reply_markup(keyboards::menu_reply())
            .await?;
        state_storage.clear(user_id).await;
        return Ok(());
    };

    if services.storage.users.add(new_user).await {
        // Re-read so the reply carries the stamped registration timestamp.
        if let Some(stored) = services.storage.users.get(user_id).await {
            services.notification.notify_registration(&stored).await;
            bot.send_message(
                chat_id,
                format!("✅ Registration complete!\n{}", stored.profile_text()),
            )
            .reply_markup(keyboards::menu_reply())
            .await?;
        }
        info!(user_id = user_id, "User registered");
    } else {
        bot.send_message(
            chat_id,
            "❌ Error: you are already registered or saving failed!",
        )
        .reply_markup(keyboards::menu_reply())
        .await?;
    }

    state_storage.clear(user_id).await;
    Ok(())
}
