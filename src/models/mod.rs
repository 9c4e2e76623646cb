//! Data models

pub mod admin;
pub mod booking;
pub mod broadcast;
pub mod user;

pub use admin::Admin;
pub use booking::{Booking, TIME_SLOTS};
pub use broadcast::{BroadcastRecord, BroadcastStatus};
pub use user::{NewUser, ProfileField, User, UserPatch};

use serde::{Deserialize, Deserializer};

/// Deserialize an id that may arrive as a JSON number or a string.
///
/// The backing collections are plain JSON files that get edited by hand,
/// so ids show up in both forms.
pub(crate) fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn test_user_id_accepts_number_or_string() {
        let from_number: User = serde_json::from_str(
            r#"{"id": 7, "name": "A", "surname": "B", "phone": "1", "email": "e@x",
                "category": "adv", "registered_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let from_string: User = serde_json::from_str(
            r#"{"id": "7", "name": "A", "surname": "B", "phone": "1", "email": "e@x",
                "category": "adv", "registered_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(from_number.id, 7);
        assert_eq!(from_string.id, 7);
    }
}
