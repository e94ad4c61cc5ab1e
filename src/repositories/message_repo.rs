//! Message repository for async database operations.
//!
//! Appends timeline records to conversation threads; the only table the
//! notification core ever writes.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Message, MessageChannel, NewMessage};
use crate::services::notifications::ActivityLog;

/// Message repository
#[derive(Clone)]
pub struct MessageRepository {
    pool: AsyncDbPool,
}

impl MessageRepository {
    /// Creates a new MessageRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Appends one message to a conversation timeline.
    pub async fn append(&self, new_message: NewMessage) -> AppResult<Message> {
        use crate::schema::messages::dsl::*;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        diesel::insert_into(messages)
            .values(&new_message)
            .returning(Message::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl ActivityLog for MessageRepository {
    async fn record(
        &self,
        conversation_id: i32,
        channel: MessageChannel,
        content: &str,
        automated: bool,
    ) -> AppResult<()> {
        self.append(NewMessage {
            conversation_id,
            content: content.to_string(),
            channel,
            is_from_customer: false,
            is_automated: automated,
            is_read: true,
        })
        .await?;
        Ok(())
    }
}
