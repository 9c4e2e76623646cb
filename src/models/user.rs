//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered chess-school user.
///
/// The id is the external Telegram account id; at most one record exists
/// per id. Records are created by the registration wizard and mutated
/// field-by-field by the profile-edit wizard, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "super::flexible_i64")]
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub category: String,
    pub registered_at: DateTime<Utc>,
}

/// Payload for creating a user; the store stamps `registered_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub category: String,
}

/// Partial update for a user record; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
}

impl UserPatch {
    /// A patch replacing a single profile field.
    pub fn single(field: ProfileField, value: String) -> Self {
        let mut patch = Self::default();
        match field {
            ProfileField::Name => patch.name = Some(value),
            ProfileField::Surname => patch.surname = Some(value),
            ProfileField::Phone => patch.phone = Some(value),
            ProfileField::Email => patch.email = Some(value),
            ProfileField::Category => patch.category = Some(value),
        }
        patch
    }
}

/// The editable profile fields offered by the profile-edit wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileField {
    Name,
    Surname,
    Phone,
    Email,
    Category,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::Surname,
        ProfileField::Phone,
        ProfileField::Email,
        ProfileField::Category,
    ];

    /// Stable token used in callback payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Surname => "surname",
            ProfileField::Phone => "phone",
            ProfileField::Email => "email",
            ProfileField::Category => "category",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(ProfileField::Name),
            "surname" => Some(ProfileField::Surname),
            "phone" => Some(ProfileField::Phone),
            "email" => Some(ProfileField::Email),
            "category" => Some(ProfileField::Category),
            _ => None,
        }
    }

    /// Button label shown in the field-selection keyboard.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Surname => "Surname",
            ProfileField::Phone => "Phone",
            ProfileField::Email => "Email",
            ProfileField::Category => "Skill level",
        }
    }

    /// Prompt shown when asking for a new value.
    pub fn prompt(&self) -> &'static str {
        match self {
            ProfileField::Name => "your name",
            ProfileField::Surname => "your surname",
            ProfileField::Phone => "your phone number",
            ProfileField::Email => "your email",
            ProfileField::Category => "your skill level",
        }
    }
}

impl User {
    /// Multi-line profile summary used in several handler replies.
    pub fn profile_text(&self) -> String {
        format!(
            "👤 Name: {}\n📝 Surname: {}\n📱 Phone: {}\n📧 Email: {}\n🏆 Skill level: {}",
            self.name, self.surname, self.phone, self.email, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_field_roundtrip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::parse(field.as_str()), Some(field));
        }
        assert_eq!(ProfileField::parse("rating"), None);
    }

    #[test]
    fn test_single_field_patch() {
        let patch = UserPatch::single(ProfileField::Phone, "+700".to_string());
        assert_eq!(patch.phone.as_deref(), Some("+700"));
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());
    }
}
