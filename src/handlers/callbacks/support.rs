//! Support contact flow and the operator's reply path
//!
//! The user's next free-text message is forwarded verbatim to the
//! operator together with identity metadata. The forwarded notice carries
//! a reply shortcut that puts the operator into a one-shot reply state
//! keyed by the target user id.

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardRemove, Message};
use tracing::error;

use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;

/// "Support" menu button: clears any pending wizard and waits for the
/// user's message.
pub async fn handle_support_entry(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state_storage: StateStorage,
) -> Result<()> {
    bot.send_message(
        chat_id,
        "Please describe your problem or question. We will reply as soon as we can.",
    )
    .reply_markup(KeyboardRemove::new())
    .await?;
    state_storage
        .set(user_id, ConversationState::AwaitingSupportMessage)
        .await;
    Ok(())
}

/// Forward the user's message to the operator.
///
/// The state resets whether or not forwarding succeeded, so a failed
/// send cannot be retried without re-entering the flow.
pub async fn handle_support_message(
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

    let forwarded = services
        .notification
        .forward_support(user_id, user.username.as_deref(), Utc::now(), text)
        .await;

    match forwarded {
        Ok(()) => {
            bot.send_message(
                chat_id,
                "Thank you for your message! We have received it and will reply soon.",
            )
            .reply_markup(keyboards::menu_reply())
            .await?;
        }
        Err(e) => {
            error!(user_id = user_id, error = %e, "Failed to forward support message");
            bot.send_message(
                chat_id,
                "An error occurred while sending your message. Please try again later.",
            )
            .reply_markup(keyboards::menu_reply())
            .await?;
        }
    }

    state_storage.clear(user_id).await;
    Ok(())
}

/// Operator pressed the reply shortcut on a forwarded support message.
pub async fn handle_reply_entry(
    bot: Bot,
    chat_id: ChatId,
    operator_id: i64,
    target_id: i64,
    state_storage: StateStorage,
) -> Result<()> {
    bot.send_message(chat_id, format!("Enter your reply for user (ID: {}):", target_id))
        .await?;
    state_storage
        .set(operator_id, ConversationState::AwaitingAdminReply { target_id })
        .await;
    Ok(())
}

/// Deliver the operator's reply to the stored target user.
pub async fn handle_admin_reply(
    bot: Bot,
    msg: Message,
    text: &str,
    target_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let operator_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    match services.notification.reply_to_user(target_id, text).await {
        Ok(()) => {
            bot.send_message(chat_id, "✅ Reply delivered to the user").await?;
        }
        Err(e) => {
            error!(target_id = target_id, error = %e, "Failed to deliver support reply");
            bot.send_message(chat_id, "⚠️ Could not deliver the reply").await?;
        }
    }

    state_storage.clear(operator_id).await;
    Ok(())
}
