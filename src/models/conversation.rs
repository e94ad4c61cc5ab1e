//! Conversation and timeline message models.
//!
//! A conversation groups the messages exchanged with a contact; every
//! notification attempt made by the dispatcher appends one message row to
//! the conversation timeline.

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

/// Channel a timeline message was delivered on (or originated from)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    Email,
    Sms,
    System,
}

impl diesel::query_builder::QueryId for MessageChannel {
    type QueryId = MessageChannel;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for MessageChannel {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            MessageChannel::Email => "email",
            MessageChannel::Sms => "sms",
            MessageChannel::System => "system",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for MessageChannel {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "email" => Ok(MessageChannel::Email),
            "sms" => Ok(MessageChannel::Sms),
            "system" => Ok(MessageChannel::System),
            _ => Err(format!("Unrecognized message channel: {}", s).into()),
        }
    }
}

/// Conversation lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    New,
    Ongoing,
    Closed,
}

impl diesel::query_builder::QueryId for ConversationStatus {
    type QueryId = ConversationStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for ConversationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            ConversationStatus::New => "new",
            ConversationStatus::Ongoing => "ongoing",
            ConversationStatus::Closed => "closed",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for ConversationStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "new" => Ok(ConversationStatus::New),
            "ongoing" => Ok(ConversationStatus::Ongoing),
            "closed" => Ok(ConversationStatus::Closed),
            _ => Err(format!("Unrecognized conversation status: {}", s).into()),
        }
    }
}

/// Conversation query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Conversation {
    pub id: i32,
    pub workspace_id: i32,
    pub contact_id: i32,
    pub subject: Option<String>,
    pub status: ConversationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Message query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    pub id: i32,
    pub conversation_id: i32,
    pub content: String,
    pub channel: MessageChannel,
    pub is_from_customer: bool,
    pub is_automated: bool,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

/// NewMessage insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::messages)]
pub struct NewMessage {
    pub conversation_id: i32,
    pub content: String,
    pub channel: MessageChannel,
    pub is_from_customer: bool,
    pub is_automated: bool,
    pub is_read: bool,
}
