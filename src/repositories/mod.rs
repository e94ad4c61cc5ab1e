//! Repository layer for data access operations.
//!
//! Provides async read and append operations over the domain tables the
//! notification core touches.

mod booking_repo;
mod integration_repo;
mod message_repo;

pub use booking_repo::BookingRepository;
pub use integration_repo::IntegrationRepository;
pub use message_repo::MessageRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub integrations: IntegrationRepository,
    pub messages: MessageRepository,
    pub bookings: BookingRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            integrations: IntegrationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }
}
