//! Message handlers module
//!
//! Free-text messages are routed by the sender's current wizard state.
//! With no wizard in flight, the only recognized text is the "Menu"
//! reply-keyboard shortcut; everything else is dropped silently.

use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::debug;

use crate::handlers::callbacks::{profile, registration, support};
use crate::handlers::commands::{admin, start};
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    // Wizards only run in private chats.
    if !msg.chat.id.is_user() {
        return Ok(());
    }

    let Some(text) = msg.text().map(str::to_string) else {
        return Ok(());
    };

    let state = state_storage.load(user_id).await;
    debug!(user_id = user_id, state = state.describe(), "Processing message");

    match state {
        ConversationState::Registration { step, draft } => {
            registration::handle_registration_step(
                bot,
                msg,
                &text,
                step,
                draft,
                services,
                state_storage,
            )
            .await
        }
        ConversationState::AwaitingFieldValue { field } => {
            profile::handle_new_value(bot, msg, &text, field, services, state_storage).await
        }
        ConversationState::AwaitingSupportMessage => {
            support::handle_support_message(bot, msg, &text, services, state_storage).await
        }
        ConversationState::AwaitingAdminReply { target_id } => {
            support::handle_admin_reply(bot, msg, &text, target_id, services, state_storage).await
        }
        ConversationState::AwaitingBroadcast => {
            admin::handle_broadcast_message(bot, msg, &text, services, state_storage).await
        }
        _ => {
            if text.eq_ignore_ascii_case("menu") {
                start::handle_menu(bot, msg.chat.id).await
            } else {
                debug!(user_id = user_id, "Unmatched message dropped");
                Ok(())
            }
        }
    }
}
