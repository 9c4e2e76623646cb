//! Integration tests for the broadcast fan-out accounting.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tempfile::TempDir;

use ChessBuddy::config::BroadcastConfig;
use ChessBuddy::models::broadcast::BroadcastStatus;
use ChessBuddy::models::user::User;
use ChessBuddy::services::BroadcastService;
use ChessBuddy::storage::StorageService;
use ChessBuddy::utils::errors::ChessBuddyError;

fn users(count: i64) -> Vec<User> {
    (1..=count)
        .map(|id| User {
            id,
            name: format!("User{}", id),
            surname: "Test".to_string(),
            phone: format!("+7000000000{}", id),
            email: format!("u{}@example.com", id),
            category: "beginner".to_string(),
            registered_at: Utc::now(),
        })
        .collect()
}

async fn service(progress_every: u32) -> (TempDir, StorageService, BroadcastService) {
    let dir = TempDir::new().expect("temp dir");
    let storage = StorageService::at_dir(dir.path()).await;
    let config = BroadcastConfig {
        delay_ms: 0,
        progress_every,
    };
    let service = BroadcastService::new(storage.broadcasts.clone(), &config);
    (dir, storage, service)
}

#[tokio::test]
async fn test_failed_delivery_is_counted_and_skipped() {
    let (_dir, storage, service) = service(10).await;
    let users = users(3);

    let report = service
        .broadcast(
            "class moved to 18:00",
            &users,
            |user| {
                let id = user.id;
                async move {
                    if id == 2 {
                        Err(ChessBuddyError::InvalidInput("blocked".to_string()))
                    } else {
                        Ok(())
                    }
                }
            },
            |_, _| async {},
        )
        .await;

    assert_eq!(report.success, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total, 3);

    // Exactly one audit record, carrying the final tallies.
    let history = storage.broadcasts.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "class moved to 18:00");
    assert_eq!(history[0].success_count, 2);
    assert_eq!(history[0].failed_count, 1);
    assert_eq!(history[0].status, BroadcastStatus::Completed);
}

#[tokio::test]
async fn test_progress_reported_every_nth_success() {
    let (_dir, _storage, service) = service(2).await;
    let users = users(5);

    let ticks = Arc::new(Mutex::new(Vec::new()));
    let ticks_ref = ticks.clone();

    service
        .broadcast(
            "hello",
            &users,
            |_| async { Ok(()) },
            move |sent, total| {
                let ticks = ticks_ref.clone();
                async move {
                    ticks.lock().unwrap().push((sent, total));
                }
            },
        )
        .await;

    assert_eq!(*ticks.lock().unwrap(), vec![(2, 5), (4, 5)]);
}

#[tokio::test]
async fn test_every_user_gets_exactly_one_send() {
    let (_dir, _storage, service) = service(10).await;
    let users = users(4);

    let sends = Arc::new(AtomicU32::new(0));
    let sends_ref = sends.clone();

    let report = service
        .broadcast(
            "weekly digest",
            &users,
            move |_| {
                let sends = sends_ref.clone();
                async move {
                    sends.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
            |_, _| async {},
        )
        .await;

    assert_eq!(sends.load(Ordering::SeqCst), 4);
    assert_eq!(report.success, 4);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn test_each_run_appends_its_own_record() {
    let (_dir, storage, service) = service(10).await;
    let users = users(2);

    service
        .broadcast("first", &users, |_| async { Ok(()) }, |_, _| async {})
        .await;
    service
        .broadcast("second", &users, |_| async { Ok(()) }, |_, _| async {})
        .await;

    let history = storage.broadcasts.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, "first");
    assert_eq!(history[1].text, "second");
}
