//! API request and response DTOs.

mod health;
mod tasks;

pub use health::HealthResponse;
pub use tasks::ReminderSweepResponse;
