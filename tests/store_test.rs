//! Integration tests for the flat-file record store.

use tempfile::TempDir;

use ChessBuddy::models::booking::TIME_SLOTS;
use ChessBuddy::models::user::{NewUser, ProfileField, UserPatch};
use ChessBuddy::storage::StorageService;

fn new_user(id: i64) -> NewUser {
    NewUser {
        id,
        name: "Alice".to_string(),
        surname: "Ivanova".to_string(),
        phone: "+70000000001".to_string(),
        email: "alice@example.com".to_string(),
        category: "beginner".to_string(),
    }
}

async fn storage() -> (TempDir, StorageService) {
    let dir = TempDir::new().expect("temp dir");
    let storage = StorageService::at_dir(dir.path()).await;
    (dir, storage)
}

#[tokio::test]
async fn test_added_user_is_readable_with_stamped_timestamp() {
    let (_dir, storage) = storage().await;

    assert!(storage.users.add(new_user(7)).await);

    let user = storage.users.get(7).await.expect("user present");
    assert_eq!(user.id, 7);
    assert_eq!(user.name, "Alice");
    assert_eq!(user.surname, "Ivanova");
    assert_eq!(user.phone, "+70000000001");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.category, "beginner");
    // The store, not the caller, stamps the registration time.
    assert!(!user.registered_at.to_rfc3339().is_empty());
}

#[tokio::test]
async fn test_duplicate_user_leaves_collection_unchanged() {
    let (_dir, storage) = storage().await;

    assert!(storage.users.add(new_user(7)).await);
    let before = storage.users.list().await;

    let mut duplicate = new_user(7);
    duplicate.name = "Mallory".to_string();
    assert!(!storage.users.add(duplicate).await);

    let after = storage.users.list().await;
    assert_eq!(before, after);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Alice");
}

#[tokio::test]
async fn test_update_merges_single_field() {
    let (_dir, storage) = storage().await;
    storage.users.add(new_user(7)).await;

    let patch = UserPatch::single(ProfileField::Phone, "+79990000000".to_string());
    assert!(storage.users.update(7, patch).await);

    let user = storage.users.get(7).await.unwrap();
    assert_eq!(user.phone, "+79990000000");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_update_missing_user_is_a_noop() {
    let (_dir, storage) = storage().await;
    storage.users.add(new_user(7)).await;

    let patch = UserPatch::single(ProfileField::Name, "Nobody".to_string());
    assert!(!storage.users.update(99, patch).await);
    assert_eq!(storage.users.list().await.len(), 1);
}

#[tokio::test]
async fn test_duplicate_booking_rejected() {
    let (_dir, storage) = storage().await;
    let slot = TIME_SLOTS[0];

    assert!(storage.bookings.add(7, slot).await);
    assert!(!storage.bookings.add(7, slot).await);

    assert_eq!(storage.bookings.for_user(7).await.len(), 1);
}

#[tokio::test]
async fn test_same_slot_open_to_any_number_of_users() {
    let (_dir, storage) = storage().await;
    let slot = TIME_SLOTS[2];

    for id in 1..=5 {
        assert!(storage.bookings.add(id, slot).await);
    }

    assert_eq!(storage.bookings.list().await.len(), 5);
}

#[tokio::test]
async fn test_cancel_removes_exactly_one_booking() {
    let (_dir, storage) = storage().await;

    storage.bookings.add(7, TIME_SLOTS[0]).await;
    storage.bookings.add(7, TIME_SLOTS[1]).await;
    storage.bookings.add(8, TIME_SLOTS[0]).await;

    assert!(storage.bookings.cancel(7, TIME_SLOTS[0]).await);

    let all = storage.bookings.list().await;
    assert_eq!(all.len(), 2);
    assert!(!all.iter().any(|b| b.user_id == 7 && b.time_slot == TIME_SLOTS[0]));
    // The other user's booking for the same slot is untouched.
    assert!(all.iter().any(|b| b.user_id == 8 && b.time_slot == TIME_SLOTS[0]));
}

#[tokio::test]
async fn test_cancel_unknown_booking_reports_failure() {
    let (_dir, storage) = storage().await;
    storage.bookings.add(7, TIME_SLOTS[0]).await;

    assert!(!storage.bookings.cancel(7, TIME_SLOTS[1]).await);
    assert_eq!(storage.bookings.list().await.len(), 1);
}

#[tokio::test]
async fn test_admin_roster_roundtrip() {
    let (_dir, storage) = storage().await;

    assert!(!storage.admins.is_admin(42).await);
    assert!(storage.admins.add(42, "Maria", vec!["broadcast".to_string()]).await);
    assert!(storage.admins.is_admin(42).await);
    assert!(!storage.admins.add(42, "Maria again", vec![]).await);
    assert_eq!(storage.admins.permissions(42).await, vec!["broadcast".to_string()]);

    assert!(storage.admins.remove(42).await);
    assert!(!storage.admins.is_admin(42).await);
}
