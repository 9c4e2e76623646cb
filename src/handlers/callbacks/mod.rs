//! Callback query handlers module
//!
//! A single dispatcher routes every inline-button press. Callback data is
//! `action` or `action:payload`; routing is one match over the action and
//! the sender's current wizard state, so overlapping-prefix ambiguity
//! cannot arise. State-gated actions (`time:`, `edit:`, `cancel:`,
//! `cancel_yes:`) are dropped when the sender is not in the matching
//! wizard step. Anything unmatched is dropped silently.

pub mod booking;
pub mod profile;
pub mod registration;
pub mod support;

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId};
use tracing::{debug, warn};

use crate::handlers::commands::{admin, start};
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;

const SCHEDULE_TEXT: &str = "🎖️ Chess class schedule 🎖️\n\n\
✅ Classes run daily except Sunday:\n\n\
Mon 17:00-19:00\n\
Tue 16:00-18:00\n\
Wed 18:00-20:00\n\
Thu 16:00-18:00\n\
Fri 17:00-19:00\n\
Sat 10:00-12:00\n\n\
🆚 Groups are formed by playing strength:\n\
- Beginners: Tuesday and Thursday at 16:00\n\
- Advanced players: Wednesday and Friday at 18:00\n\
- Kids: Saturday at 10:00\n\n\
🛠 Individual lessons are available by arrangement.\n\n\
Join the world of chess and climb to mastery with us!";

const COACH_TEXT: &str = "🌟 Chess is your road to success! 🌟\n\n\
With coach Maria 🔥 you will discover the secrets of the great players \
of the past and present, learn to analyse positions properly, build \
plans and convert them into wins.\n\n\
✅ Play consciously and win with confidence!\n\
✅ Raise your rating and compete in tournaments!\n\
✅ Build your own school of success on the board!\n\n\
Come to a training session and join our team of winners!";

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    debug!(user_id = user_id, callback_data = %data, "Processing callback query");

    // Answer first to clear the button's loading state.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    let (action, payload) = match data.split_once(':') {
        Some((action, payload)) => (action, Some(payload)),
        None => (data.as_str(), None),
    };

    let state = state_storage.load(user_id).await;

    match (action, payload, &state) {
        ("menu", None, _) => {
            // Opening the menu abandons any wizard in progress.
            state_storage.clear(user_id).await;
            start::handle_menu(bot, chat_id).await?;
        }
        ("schedule", None, _) => {
            bot.send_message(chat_id, SCHEDULE_TEXT).await?;
        }
        ("coach", None, _) => {
            bot.send_message(chat_id, COACH_TEXT).await?;
        }
        ("support", None, _) => {
            support::handle_support_entry(bot, chat_id, user_id, state_storage).await?;
        }
        ("register", None, _) => {
            registration::handle_registration_entry(bot, chat_id, user_id, services, state_storage)
                .await?;
        }
        ("profile", None, _) => {
            profile::show_profile(bot, chat_id, user_id, services).await?;
        }
        ("edit_profile", None, _) => {
            profile::handle_edit_entry(bot, chat_id, user_id, services, state_storage).await?;
        }
        ("edit", Some(field), ConversationState::ChoosingEditField) => {
            profile::handle_field_chosen(bot, chat_id, user_id, field, state_storage).await?;
        }
        ("edit_cancel", None, _) => {
            profile::handle_edit_cancel(bot, chat_id, user_id, state_storage).await?;
        }
        ("book", None, _) => {
            booking::handle_booking_entry(bot, chat_id, user_id, services, state_storage).await?;
        }
        ("time", Some(slot), ConversationState::ChoosingTime) => {
            booking::handle_time_selected(bot, chat_id, user_id, slot, services, state_storage)
                .await?;
        }
        ("my_bookings", None, _) => {
            booking::show_my_bookings(bot, chat_id, user_id, services).await?;
        }
        ("cancel_booking", None, _) => {
            booking::handle_cancel_entry(bot, chat_id, user_id, services, state_storage).await?;
        }
        ("cancel", Some(slot), ConversationState::ConfirmingCancellation) => {
            booking::handle_cancel_selected(bot, chat_id, slot).await?;
        }
        ("cancel_yes", Some(slot), ConversationState::ConfirmingCancellation) => {
            booking::handle_cancel_confirmed(bot, chat_id, user_id, slot, services, state_storage)
                .await?;
        }
        ("reply", Some(target), _) => {
            if let Ok(target_id) = target.parse::<i64>() {
                support::handle_reply_entry(bot, chat_id, user_id, target_id, state_storage)
                    .await?;
            }
        }
        ("broadcast_confirm", None, _) => {
            admin::handle_broadcast_prompt(bot, chat_id, user_id, services, state_storage).await?;
        }
        ("broadcast_cancel", None, _) => {
            state_storage.clear(user_id).await;
            bot.send_message(chat_id, "Broadcast cancelled.").await?;
        }
        ("admin", Some(admin_action), _) => {
            admin::handle_admin_callback(bot, chat_id, user_id, admin_action, services, state_storage)
                .await?;
        }
        _ => {
            debug!(user_id = user_id, callback_data = %data, state = state.describe(),
                   "Unmatched callback dropped");
        }
    }

    Ok(())
}
