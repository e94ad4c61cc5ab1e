//! Booking models, including the reminder-sweep read model.

use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Booking lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    NoShow,
    Cancelled,
}

impl diesel::query_builder::QueryId for BookingStatus {
    type QueryId = BookingStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl ToSql<Text, Pg> for BookingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for BookingStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "no_show" => Ok(BookingStatus::NoShow),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Unrecognized booking status: {}", s).into()),
        }
    }
}

/// Booking query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: i32,
    pub workspace_id: i32,
    pub contact_id: i32,
    pub service_id: i32,
    pub booking_date: NaiveDateTime,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub calendar_event_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Denormalized projection of a booking due for a reminder, joined with its
/// contact, service, and workspace.
#[derive(Debug, Clone)]
pub struct ReminderCandidate {
    pub booking_id: i32,
    pub booking_date: NaiveDateTime,
    pub workspace_id: i32,
    pub workspace_name: String,
    pub contact_name: String,
    pub contact_email: Option<String>,
    pub service_name: String,
    pub duration_minutes: i32,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_round_trip_labels() {
        assert_eq!(BookingStatus::NoShow.as_str(), "no_show");
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
    }

    #[test]
    fn test_booking_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&BookingStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
        let parsed: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, BookingStatus::Cancelled);
    }
}
