//! Booking model and the fixed weekly schedule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six bookable weekly class slots.
///
/// These labels are the booking key: bookings store the label verbatim and
/// the (user id, label) pair is unique. There is no per-slot capacity; any
/// number of users may book the same slot.
pub const TIME_SLOTS: [&str; 6] = [
    "Mon 17:00-19:00",
    "Tue 16:00-18:00",
    "Wed 18:00-20:00",
    "Thu 16:00-18:00",
    "Fri 17:00-19:00",
    "Sat 10:00-12:00",
];

/// A class booking held by a user.
///
/// `user_id` is a soft reference: a booking may outlive the user record
/// it points at without error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    #[serde(deserialize_with = "super::flexible_i64")]
    pub user_id: i64,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

/// Check whether a label is one of the fixed weekly slots.
pub fn is_known_slot(label: &str) -> bool {
    TIME_SLOTS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_slots() {
        assert!(is_known_slot("Mon 17:00-19:00"));
        assert!(!is_known_slot("Sun 09:00-11:00"));
    }
}
