//! Inline and reply keyboards shared across handlers

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::models::booking::TIME_SLOTS;
use crate::models::user::ProfileField;

/// The main inline menu.
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("📋 Register", "register"),
            InlineKeyboardButton::callback("📝 Book a class", "book"),
        ],
        vec![
            InlineKeyboardButton::callback("📅 My bookings", "my_bookings"),
            InlineKeyboardButton::callback("👤 My profile", "profile"),
        ],
        vec![
            InlineKeyboardButton::callback("🕒 Schedule", "schedule"),
            InlineKeyboardButton::callback("👨‍🏫 Coach", "coach"),
        ],
        vec![InlineKeyboardButton::callback("🆘 Support", "support")],
    ])
}

/// Persistent reply keyboard with the single "Menu" shortcut.
pub fn menu_reply() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new("Menu")]]).resize_keyboard()
}

/// Slot selection keyboard, two slots per row.
pub fn time_slots() -> InlineKeyboardMarkup {
    let rows = TIME_SLOTS
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|slot| InlineKeyboardButton::callback(*slot, format!("time:{}", slot)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

/// Profile-field selection keyboard with a cancel action.
pub fn edit_fields() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = ProfileField::ALL
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|field| {
                    InlineKeyboardButton::callback(field.label(), format!("edit:{}", field.as_str()))
                })
                .collect()
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("Cancel", "edit_cancel")]);

    InlineKeyboardMarkup::new(rows)
}

/// Single cancel button shown while waiting for a new field value.
pub fn edit_cancel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Cancel",
        "edit_cancel",
    )]])
}

/// The operator panel.
pub fn admin_panel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📊 All bookings", "admin:bookings")],
        vec![InlineKeyboardButton::callback("👥 All users", "admin:users")],
        vec![InlineKeyboardButton::callback("📢 New broadcast", "admin:broadcast")],
    ])
}

/// Refresh/back row appended to the operator list views.
pub fn admin_list_nav(refresh_action: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🔄 Refresh", refresh_action.to_string())],
        vec![InlineKeyboardButton::callback("⬅️ Back", "admin:back")],
    ])
}
