//! In-process scheduled jobs.

mod scheduler;

pub use scheduler::ReminderScheduler;
