use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// Bookable service offering query model
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: i32,
    pub workspace_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub location: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
