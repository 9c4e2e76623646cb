//! Conversation state management

pub mod context;
pub mod storage;

pub use context::{ConversationState, RegistrationDraft, RegistrationStep};
pub use storage::StateStorage;
