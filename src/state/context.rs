//! Conversation state machine
//!
//! Every user is in exactly one state at a time. Entering a wizard
//! overwrites whatever wizard was pending for that user (last-entry-wins),
//! and every terminal path (commit, cancel, error) resets to `Idle`.

use serde::{Deserialize, Serialize};

use crate::models::user::{NewUser, ProfileField};

/// Per-user wizard state.
///
/// The variants map one-to-one onto the bot's flows: the registration
/// wizard, the two profile-edit steps, slot selection, cancellation
/// confirmation, support contact, the operator's reply to a forwarded
/// support message, and the operator broadcast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    Registration {
        step: RegistrationStep,
        draft: RegistrationDraft,
    },
    ChoosingEditField,
    AwaitingFieldValue {
        field: ProfileField,
    },
    ChoosingTime,
    ConfirmingCancellation,
    AwaitingSupportMessage,
    AwaitingAdminReply {
        target_id: i64,
    },
    AwaitingBroadcast,
}

impl ConversationState {
    /// Start the registration wizard at its first step.
    pub fn start_registration() -> Self {
        ConversationState::Registration {
            step: RegistrationStep::Name,
            draft: RegistrationDraft::default(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }

    /// Short state name for structured logging.
    pub fn describe(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::Registration { .. } => "registration",
            ConversationState::ChoosingEditField => "choosing_edit_field",
            ConversationState::AwaitingFieldValue { .. } => "awaiting_field_value",
            ConversationState::ChoosingTime => "choosing_time",
            ConversationState::ConfirmingCancellation => "confirming_cancellation",
            ConversationState::AwaitingSupportMessage => "awaiting_support_message",
            ConversationState::AwaitingAdminReply { .. } => "awaiting_admin_reply",
            ConversationState::AwaitingBroadcast => "awaiting_broadcast",
        }
    }
}

/// The registration wizard's linear step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStep {
    Name,
    Surname,
    Phone,
    Email,
    Category,
}

impl RegistrationStep {
    /// The step that follows this one, or `None` at the terminal step.
    pub fn next(&self) -> Option<RegistrationStep> {
        match self {
            RegistrationStep::Name => Some(RegistrationStep::Surname),
            RegistrationStep::Surname => Some(RegistrationStep::Phone),
            RegistrationStep::Phone => Some(RegistrationStep::Email),
            RegistrationStep::Email => Some(RegistrationStep::Category),
            RegistrationStep::Category => None,
        }
    }

    /// Prompt for the value this step collects.
    pub fn prompt(&self) -> &'static str {
        match self {
            RegistrationStep::Name => "Enter your name",
            RegistrationStep::Surname => "Enter your surname",
            RegistrationStep::Phone => "Enter your phone number",
            RegistrationStep::Email => "Enter your email",
            RegistrationStep::Category => "Enter your skill level",
        }
    }
}

/// Fields collected so far by the registration wizard.
///
/// Input is accepted verbatim: the wizard has no validation and no
/// back-navigation, each step stores its value and advances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
}

impl RegistrationDraft {
    /// Store the value collected at `step`.
    pub fn record(&mut self, step: RegistrationStep, value: &str) {
        let value = value.to_string();
        match step {
            RegistrationStep::Name => self.name = Some(value),
            RegistrationStep::Surname => self.surname = Some(value),
            RegistrationStep::Phone => self.phone = Some(value),
            RegistrationStep::Email => self.email = Some(value),
            RegistrationStep::Category => self.category = Some(value),
        }
    }

    /// Convert the draft into a storable user once all five fields are in.
    pub fn into_new_user(self, id: i64) -> Option<NewUser> {
        Some(NewUser {
            id,
            name: self.name?,
            surname: self.surname?,
            phone: self.phone?,
            email: self.email?,
            category: self.category?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = ConversationState::default();
        assert!(state.is_idle());
    }

    #[test]
    fn test_registration_starts_at_name() {
        let state = ConversationState::start_registration();
        assert_eq!(
            state,
            ConversationState::Registration {
                step: RegistrationStep::Name,
                draft: RegistrationDraft::default(),
            }
        );
    }

    #[test]
    fn test_step_sequence_is_linear() {
        let mut steps = vec![RegistrationStep::Name];
        while let Some(next) = steps.last().unwrap().next() {
            steps.push(next);
        }
        assert_eq!(
            steps,
            vec![
                RegistrationStep::Name,
                RegistrationStep::Surname,
                RegistrationStep::Phone,
                RegistrationStep::Email,
                RegistrationStep::Category,
            ]
        );
    }

    #[test]
    fn test_draft_completes_into_new_user() {
        let mut draft = RegistrationDraft::default();
        draft.record(RegistrationStep::Name, "A");
        draft.record(RegistrationStep::Surname, "B");
        draft.record(RegistrationStep::Phone, "1");
        draft.record(RegistrationStep::Email, "e@x");
        draft.record(RegistrationStep::Category, "adv");

        let user = draft.into_new_user(123).unwrap();
        assert_eq!(user.id, 123);
        assert_eq!(user.name, "A");
        assert_eq!(user.surname, "B");
        assert_eq!(user.phone, "1");
        assert_eq!(user.email, "e@x");
        assert_eq!(user.category, "adv");
    }

    #[test]
    fn test_incomplete_draft_yields_no_user() {
        let mut draft = RegistrationDraft::default();
        draft.record(RegistrationStep::Name, "A");
        assert!(draft.into_new_user(123).is_none());
    }
}
