//! Integration tests for the conversation wizards, driven through the
//! state machine and the record store without a live transport.

use assert_matches::assert_matches;
use tempfile::TempDir;

use ChessBuddy::handlers::callbacks::booking::{booking_gate, BookingGate};
use ChessBuddy::models::booking::TIME_SLOTS;
use ChessBuddy::models::user::NewUser;
use ChessBuddy::state::{ConversationState, StateStorage};
use ChessBuddy::storage::StorageService;

async fn storage() -> (TempDir, StorageService) {
    let dir = TempDir::new().expect("temp dir");
    let storage = StorageService::at_dir(dir.path()).await;
    (dir, storage)
}

/// Feed one free-text answer into the registration wizard, advancing or
/// committing exactly as the message handler does. Returns the next state
/// and, at the terminal step, the store's add outcome.
async fn registration_turn(
    storage: &StorageService,
    user_id: i64,
    state: ConversationState,
    input: &str,
) -> (ConversationState, Option<bool>) {
    let ConversationState::Registration { step, mut draft } = state else {
        panic!("not in the registration wizard");
    };

    draft.record(step, input);
    match step.next() {
        Some(next) => (ConversationState::Registration { step: next, draft }, None),
        None => {
            let new_user = draft.into_new_user(user_id).expect("complete draft");
            let added = storage.users.add(new_user).await;
            (ConversationState::Idle, Some(added))
        }
    }
}

#[tokio::test]
async fn test_registration_wizard_commits_one_user_verbatim() {
    let (_dir, storage) = storage().await;
    let states = StateStorage::new();
    let user_id = 7;

    states.set(user_id, ConversationState::start_registration()).await;

    // Values pass through unvalidated, including the odd-looking ones.
    let answers = ["Boris", "Petrov", "not a phone", "boris at mail", "  "];
    for answer in answers {
        let state = states.load(user_id).await;
        let (next, committed) = registration_turn(&storage, user_id, state, answer).await;
        if next.is_idle() {
            assert_eq!(committed, Some(true));
            states.clear(user_id).await;
        } else {
            states.set(user_id, next).await;
        }
    }

    assert_matches!(states.load(user_id).await, ConversationState::Idle);

    let users = storage.users.list().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Boris");
    assert_eq!(users[0].surname, "Petrov");
    assert_eq!(users[0].phone, "not a phone");
    assert_eq!(users[0].email, "boris at mail");
    assert_eq!(users[0].category, "  ");
}

#[tokio::test]
async fn test_reregistration_keeps_original_record() {
    let (_dir, storage) = storage().await;
    let user_id = 7;

    let mut state = ConversationState::start_registration();
    let mut committed = None;
    for answer in ["First", "Run", "1", "a@b", "kids"] {
        (state, committed) = registration_turn(&storage, user_id, state, answer).await;
    }
    assert_eq!(committed, Some(true));

    let mut state = ConversationState::start_registration();
    let mut committed = None;
    for answer in ["Second", "Run", "2", "c@d", "adult"] {
        (state, committed) = registration_turn(&storage, user_id, state, answer).await;
    }
    // The duplicate id is rejected at the commit step but the wizard
    // still resets.
    assert_eq!(committed, Some(false));
    assert_matches!(state, ConversationState::Idle);

    let users = storage.users.list().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "First");
}

#[tokio::test]
async fn test_booking_gate_blocks_unregistered_users() {
    let (_dir, storage) = storage().await;

    let user = storage.users.get(7).await;
    assert_eq!(booking_gate(user.as_ref()), Err(BookingGate::NotRegistered));
}

#[tokio::test]
async fn test_booking_gate_admits_registered_users() {
    let (_dir, storage) = storage().await;
    storage
        .users
        .add(NewUser {
            id: 7,
            name: "Alice".to_string(),
            surname: "Ivanova".to_string(),
            phone: "+70000000001".to_string(),
            email: "alice@example.com".to_string(),
            category: "beginner".to_string(),
        })
        .await;

    let user = storage.users.get(7).await;
    assert!(booking_gate(user.as_ref()).is_ok());
}

#[tokio::test]
async fn test_cancellation_confirm_removes_the_booking() {
    let (_dir, storage) = storage().await;
    let states = StateStorage::new();
    let user_id = 7;
    let slot = TIME_SLOTS[0];

    storage.bookings.add(user_id, slot).await;
    states.set(user_id, ConversationState::ConfirmingCancellation).await;

    // Confirmed: the booking goes away and the wizard resets.
    assert!(storage.bookings.cancel(user_id, slot).await);
    states.clear(user_id).await;

    assert!(storage.bookings.for_user(user_id).await.is_empty());
    assert_matches!(states.load(user_id).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_cancellation_decline_keeps_the_booking() {
    let (_dir, storage) = storage().await;
    let states = StateStorage::new();
    let user_id = 7;
    let slot = TIME_SLOTS[0];

    storage.bookings.add(user_id, slot).await;
    states.set(user_id, ConversationState::ConfirmingCancellation).await;

    // Declining only resets the wizard; the record is untouched.
    states.clear(user_id).await;

    assert_eq!(storage.bookings.for_user(user_id).await.len(), 1);
    assert_matches!(states.load(user_id).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_entering_a_new_wizard_abandons_the_old_one() {
    let states = StateStorage::new();
    let user_id = 7;

    states.set(user_id, ConversationState::start_registration()).await;
    states.set(user_id, ConversationState::ChoosingTime).await;

    assert_matches!(states.load(user_id).await, ConversationState::ChoosingTime);
}
