//! Booking and cancellation wizards
//!
//! Booking is a single slot-selection step gated on a registered profile
//! with a phone number. Cancellation lists the user's bookings and asks
//! for confirmation before removing one.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::debug;

use crate::handlers::keyboards;
use crate::models::booking::is_known_slot;
use crate::models::user::User;
use crate::services::ServiceFactory;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Why a user cannot enter the booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingGate {
    NotRegistered,
    MissingPhone,
}

/// Booking entry precondition: an existing profile with a phone number.
pub fn booking_gate(user: Option<&User>) -> std::result::Result<&User, BookingGate> {
    let user = user.ok_or(BookingGate::NotRegistered)?;
    if user.phone.trim().is_empty() {
        return Err(BookingGate::MissingPhone);
    }
    Ok(user)
}

/// "Book a class" menu button.
pub async fn handle_booking_entry(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let user = services.storage.users.get(user_id).await;

    match booking_gate(user.as_ref()) {
        Err(BookingGate::NotRegistered) => {
            bot.send_message(chat_id, "❌ You need to register before booking a class!")
                .reply_markup(keyboards::menu_reply())
                .await?;
            return Ok(());
        }
        Err(BookingGate::MissingPhone) => {
            bot.send_message(chat_id, "❌ Your profile is missing required details!")
                .reply_markup(keyboards::menu_reply())
                .await?;
            return Ok(());
        }
        Ok(_) => {}
    }

    bot.send_message(chat_id, "🕒 Choose a convenient class time:")
        .reply_markup(keyboards::time_slots())
        .await?;
    state_storage.set(user_id, ConversationState::ChoosingTime).await;
    Ok(())
}

/// Slot picked; attempt the booking. The wizard resets to idle whatever
/// the outcome.
pub async fn handle_time_selected(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    slot: &str,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if !is_known_slot(slot) {
        debug!(user_id = user_id, slot = slot, "Unknown slot label dropped");
        return Ok(());
    }

    let Some(user) = services.storage.users.get(user_id).await else {
        bot.send_message(chat_id, "❌ You need to register before booking a class!")
            .reply_markup(keyboards::menu_reply())
            .await?;
        state_storage.clear(user_id).await;
        return Ok(());
    };

    if services.storage.bookings.add(user_id, slot).await {
        log_user_action(user_id, "booking_created", Some(slot));

        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "Cancel booking",
            "cancel_booking",
        )]]);
        bot.send_message(
            chat_id,
            format!(
                "✅ You are booked for a class!\n\n📅 Time: {}\n👤 Name: {}\n📱 Phone: {}\n\n\
                 The coach will contact you to confirm.",
                slot, user.name, user.phone,
            ),
        )
        .reply_markup(keyboard)
        .await?;

        services.notification.notify_booking(&user, slot).await;
    } else {
        bot.send_message(chat_id, "❌ You are already booked for this time!")
            .reply_markup(keyboards::menu_reply())
            .await?;
    }

    state_storage.clear(user_id).await;
    Ok(())
}

/// "My bookings" menu button.
pub async fn show_my_bookings(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let bookings = services.storage.bookings.for_user(user_id).await;

    if bookings.is_empty() {
        bot.send_message(chat_id, "❌ You have no active class bookings.")
            .reply_markup(keyboards::menu_reply())
            .await?;
        return Ok(());
    }

    let mut text = String::from("📅 Your class bookings:\n\n");
    for (i, booking) in bookings.iter().enumerate() {
        text.push_str(&format!(
            "{}. 🕒 {}\n   📅 Booked: {}\n\n",
            i + 1,
            booking.time_slot,
            booking.created_at.format("%d-%m-%Y %H:%M"),
        ));
    }

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("❌ Cancel a booking", "cancel_booking")],
        vec![InlineKeyboardButton::callback("⬅️ Back", "menu")],
    ]);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Enter the cancellation wizard: list the user's bookings with cancel
/// actions. Short-circuits with a notice when there is nothing to cancel.
pub async fn handle_cancel_entry(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    let bookings = services.storage.bookings.for_user(user_id).await;

    if bookings.is_empty() {
        bot.send_message(chat_id, "❌ You have no active class bookings.")
            .reply_markup(keyboards::menu_reply())
            .await?;
        return Ok(());
    }

    let mut rows: Vec<Vec<InlineKeyboardButton>> = bookings
        .iter()
        .map(|b| {
            vec![InlineKeyboardButton::callback(
                format!("❌ Cancel {}", b.time_slot),
                format!("cancel:{}", b.time_slot),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "menu")]);

    let listing = bookings
        .iter()
        .map(|b| format!("🕒 {}", b.time_slot))
        .collect::<Vec<_>>()
        .join("\n");

    bot.send_message(chat_id, format!("📝 Your active bookings:\n\n{}", listing))
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await?;
    state_storage
        .set(user_id, ConversationState::ConfirmingCancellation)
        .await;
    Ok(())
}

/// A booking was picked for cancellation; ask for confirmation.
pub async fn handle_cancel_selected(
    bot: Bot,
    chat_id: ChatId,
    slot: &str,
) -> Result<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Yes, cancel it", format!("cancel_yes:{}", slot)),
        InlineKeyboardButton::callback("No, keep it", "menu"),
    ]]);

    bot.send_message(
        chat_id,
        format!("Are you sure you want to cancel the booking for {}?", slot),
    )
    .reply_markup(keyboard)
    .await?;
    Ok(())
}

/// Confirmed cancellation: remove the booking and notify.
pub async fn handle_cancel_confirmed(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    slot: &str,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    if services.storage.bookings.cancel(user_id, slot).await {
        log_user_action(user_id, "booking_cancelled", Some(slot));

        if let Some(user) = services.storage.users.get(user_id).await {
            services.notification.notify_cancellation(&user, slot).await;
        }

        bot.send_message(chat_id, format!("✅ Booking for {} cancelled.", slot))
            .reply_markup(keyboards::menu_reply())
            .await?;
    } else {
        debug!(user_id = user_id, slot = slot, "Cancellation target not found");
        bot.send_message(chat_id, "❌ Could not find that booking.")
            .reply_markup(keyboards::menu_reply())
            .await?;
    }

    state_storage.clear(user_id).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(phone: &str) -> User {
        User {
            id: 1,
            name: "A".to_string(),
            surname: "B".to_string(),
            phone: phone.to_string(),
            email: "e@x".to_string(),
            category: "adv".to_string(),
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_gate_requires_registration() {
        assert_eq!(booking_gate(None), Err(BookingGate::NotRegistered));
    }

    #[test]
    fn test_gate_requires_phone() {
        let no_phone = user("  ");
        assert_eq!(booking_gate(Some(&no_phone)), Err(BookingGate::MissingPhone));

        let with_phone = user("+700");
        assert!(booking_gate(Some(&with_phone)).is_ok());
    }
}
