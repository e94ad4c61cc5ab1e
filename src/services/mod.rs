//! Service layer for business logic operations.

pub mod notifications;
pub mod reminders;

pub use notifications::NotificationDispatcher;
pub use reminders::ReminderService;

use std::sync::Arc;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub dispatcher: NotificationDispatcher,
    pub reminders: ReminderService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        let dispatcher = NotificationDispatcher::new(
            Arc::new(repos.integrations.clone()),
            Arc::new(repos.messages.clone()),
        );
        let reminders = ReminderService::new(Arc::new(repos.bookings), dispatcher.clone());
        Self {
            dispatcher,
            reminders,
        }
    }
}
