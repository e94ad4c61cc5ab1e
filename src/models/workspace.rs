use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// Workspace query model.
///
/// `email_configured` and `sms_configured` are denormalized hints written by
/// the settings/onboarding paths; channel eligibility is always derived from
/// the integrations table, never from these flags.
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::workspaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Workspace {
    pub id: i32,
    pub name: String,
    pub business_type: Option<String>,
    pub email_configured: bool,
    pub sms_configured: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
