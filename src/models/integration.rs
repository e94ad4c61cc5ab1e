//! Integration models and typed provider credentials.
//!
//! An integration row connects a workspace to one external provider. The
//! raw credentials live in a JSONB `config` column; [`Integration::provider_config`]
//! parses that blob into the typed, validated credential struct for the
//! integration's channel so that malformed configuration is caught before
//! any provider call is attempted.

use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::io::Write;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Kind of external provider an integration connects to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationType {
    Email,
    Sms,
    Calendar,
    Webhook,
}

impl diesel::query_builder::QueryId for IntegrationType {
    type QueryId = IntegrationType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl IntegrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationType::Email => "email",
            IntegrationType::Sms => "sms",
            IntegrationType::Calendar => "calendar",
            IntegrationType::Webhook => "webhook",
        }
    }
}

impl ToSql<Text, Pg> for IntegrationType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for IntegrationType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "email" => Ok(IntegrationType::Email),
            "sms" => Ok(IntegrationType::Sms),
            "calendar" => Ok(IntegrationType::Calendar),
            "webhook" => Ok(IntegrationType::Webhook),
            _ => Err(format!("Unrecognized integration type: {}", s).into()),
        }
    }
}

/// Integration query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::integrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Integration {
    pub id: i32,
    pub workspace_id: i32,
    pub integration_type: IntegrationType,
    pub provider: Option<String>,
    pub config: JsonValue,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

// ============================================================================
// Typed provider credentials
// ============================================================================

fn default_from_name() -> String {
    "Appointments".to_string()
}

fn default_email_api_base() -> String {
    "https://api.brevo.com".to_string()
}

fn default_sms_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_calendar_api_base() -> String {
    "https://www.googleapis.com".to_string()
}

/// Credentials for the transactional email provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailProviderConfig {
    #[validate(length(min = 1, message = "API key must not be empty"))]
    pub api_key: String,

    #[validate(email(message = "Sender address must be a valid email"))]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    #[serde(default = "default_email_api_base")]
    pub api_base: String,
}

/// Credentials for the SMS provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SmsProviderConfig {
    #[validate(length(min = 1, message = "Account SID must not be empty"))]
    pub account_sid: String,

    #[validate(length(min = 1, message = "Auth token must not be empty"))]
    pub auth_token: String,

    #[validate(length(min = 1, message = "Sender phone number must not be empty"))]
    pub from_phone: String,

    #[serde(default = "default_sms_api_base")]
    pub api_base: String,
}

/// Stored OAuth grant for the calendar provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalendarProviderConfig {
    #[validate(length(min = 1, message = "Access token must not be empty"))]
    pub access_token: String,

    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,

    #[validate(length(min = 1, message = "Client id must not be empty"))]
    pub client_id: String,

    #[validate(length(min = 1, message = "Client secret must not be empty"))]
    pub client_secret: String,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default = "default_calendar_api_base")]
    pub api_base: String,
}

/// Parsed, validated credentials tagged by channel
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Email(EmailProviderConfig),
    Sms(SmsProviderConfig),
    Calendar(CalendarProviderConfig),
}

impl Integration {
    /// Parses the raw JSONB config into the typed credentials for this
    /// integration's channel, validating required fields.
    pub fn provider_config(&self) -> AppResult<ProviderConfig> {
        match self.integration_type {
            IntegrationType::Email => {
                let config: EmailProviderConfig = parse_config(&self.config)?;
                config.validate()?;
                Ok(ProviderConfig::Email(config))
            }
            IntegrationType::Sms => {
                let config: SmsProviderConfig = parse_config(&self.config)?;
                config.validate()?;
                Ok(ProviderConfig::Sms(config))
            }
            IntegrationType::Calendar => {
                let config: CalendarProviderConfig = parse_config(&self.config)?;
                config.validate()?;
                Ok(ProviderConfig::Calendar(config))
            }
            IntegrationType::Webhook => Err(AppError::BadRequest {
                message: "No sender is implemented for webhook integrations".to_string(),
            }),
        }
    }
}

fn parse_config<T: serde::de::DeserializeOwned>(config: &JsonValue) -> AppResult<T> {
    serde_json::from_value(config.clone()).map_err(|e| AppError::Validation {
        field: "config".to_string(),
        reason: format!("Invalid integration config: {}", e),
    })
}
