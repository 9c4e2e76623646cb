//! Broadcast fan-out service
//!
//! Delivers one message to every registered user sequentially, pacing
//! itself with a fixed delay between sends. Failures are counted, never
//! retried; there is no way to cancel a broadcast in flight. One audit
//! record is appended per completed run.
//!
//! The send and progress effects are injected so the accounting can be
//! exercised without a live transport.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info};

use crate::config::BroadcastConfig;
use crate::models::user::User;
use crate::storage::BroadcastRepository;
use crate::utils::errors::Result;

/// Tallies of one broadcast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub success: u32,
    pub failed: u32,
    pub total: usize,
}

#[derive(Clone)]
pub struct BroadcastService {
    broadcasts: BroadcastRepository,
    delay: Duration,
    progress_every: u32,
}

impl BroadcastService {
    pub fn new(broadcasts: BroadcastRepository, config: &BroadcastConfig) -> Self {
        Self {
            broadcasts,
            delay: Duration::from_millis(config.delay_ms),
            progress_every: config.progress_every.max(1),
        }
    }

    /// Run the fan-out over `users`, calling `send` once per user and
    /// `progress` after every Nth successful delivery. Appends exactly one
    /// broadcast record with the final tallies.
    pub async fn broadcast<S, SF, P, PF>(
        &self,
        text: &str,
        users: &[User],
        mut send: S,
        mut progress: P,
    ) -> BroadcastReport
    where
        S: FnMut(&User) -> SF,
        SF: Future<Output = Result<()>>,
        P: FnMut(u32, usize) -> PF,
        PF: Future<Output = ()>,
    {
        let total = users.len();
        let mut success = 0u32;
        let mut failed = 0u32;

        for user in users {
            match send(user).await {
                Ok(()) => {
                    success += 1;
                    if success % self.progress_every == 0 {
                        progress(success, total).await;
                    }
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    failed += 1;
                    error!(user_id = user.id, error = %e, "Broadcast delivery failed");
                }
            }
        }

        self.broadcasts.append(text, success, failed).await;
        info!(success = success, failed = failed, total = total, "Broadcast completed");

        BroadcastReport {
            success,
            failed,
            total,
        }
    }
}
