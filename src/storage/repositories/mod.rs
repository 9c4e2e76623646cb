//! Repository implementations, one per collection

pub mod admin;
pub mod booking;
pub mod broadcast;
pub mod user;

pub use admin::AdminRepository;
pub use booking::BookingRepository;
pub use broadcast::BroadcastRepository;
pub use user::UserRepository;
