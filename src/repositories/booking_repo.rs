//! Booking repository for async database operations.
//!
//! Supplies the reminder sweep with bookings due in its lookahead window,
//! joined with the contact, service, and workspace rows the reminder
//! content needs.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{BookingStatus, ReminderCandidate};
use crate::services::reminders::{BookingSource, ReminderWindow};

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    pool: AsyncDbPool,
}

type CandidateRow = (
    i32,
    NaiveDateTime,
    i32,
    String,
    String,
    Option<String>,
    String,
    i32,
    String,
);

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads bookings whose start falls inside the window (bounds inclusive)
    /// and whose status still warrants a reminder.
    pub async fn find_due_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<ReminderCandidate>> {
        use crate::schema::{bookings, contacts, services, workspaces};

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        let rows: Vec<CandidateRow> = bookings::table
            .inner_join(contacts::table)
            .inner_join(services::table)
            .inner_join(workspaces::table)
            .filter(bookings::booking_date.between(start, end))
            .filter(
                bookings::status.eq_any(vec![BookingStatus::Pending, BookingStatus::Confirmed]),
            )
            .order(bookings::booking_date.asc())
            .select((
                bookings::id,
                bookings::booking_date,
                workspaces::id,
                workspaces::name,
                contacts::name,
                contacts::email,
                services::name,
                services::duration_minutes,
                services::location,
            ))
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    booking_id,
                    booking_date,
                    workspace_id,
                    workspace_name,
                    contact_name,
                    contact_email,
                    service_name,
                    duration_minutes,
                    location,
                )| ReminderCandidate {
                    booking_id,
                    booking_date,
                    workspace_id,
                    workspace_name,
                    contact_name,
                    contact_email,
                    service_name,
                    duration_minutes,
                    location,
                },
            )
            .collect())
    }
}

#[async_trait]
impl BookingSource for BookingRepository {
    async fn reminder_candidates(
        &self,
        window: &ReminderWindow,
    ) -> AppResult<Vec<ReminderCandidate>> {
        self.find_due_between(window.start, window.end).await
    }
}
