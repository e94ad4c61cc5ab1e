//! Integration repository for async database operations.
//!
//! The dispatcher's credential store: read-only lookups of active provider
//! integrations per workspace and channel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Integration, IntegrationType};
use crate::services::notifications::CredentialStore;

/// Integration repository
#[derive(Clone)]
pub struct IntegrationRepository {
    pool: AsyncDbPool,
}

impl IntegrationRepository {
    /// Creates a new IntegrationRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Finds the active integration of the given type for a workspace.
    ///
    /// Nothing in the data model enforces uniqueness of active rows per
    /// (workspace, type); when several exist the most recently created one
    /// wins, with id as the final tie-break, so lookups stay deterministic.
    pub async fn find_active_by_type(
        &self,
        workspace: i32,
        itype: IntegrationType,
    ) -> AppResult<Option<Integration>> {
        use crate::schema::integrations::dsl::*;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        integrations
            .filter(workspace_id.eq(workspace))
            .filter(integration_type.eq(itype))
            .filter(is_active.eq(true))
            .order((created_at.desc(), id.desc()))
            .select(Integration::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all integrations for a workspace, newest first.
    pub async fn find_by_workspace(&self, workspace: i32) -> AppResult<Vec<Integration>> {
        use crate::schema::integrations::dsl::*;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        integrations
            .filter(workspace_id.eq(workspace))
            .order(created_at.desc())
            .select(Integration::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl CredentialStore for IntegrationRepository {
    async fn find_active(
        &self,
        workspace_id: i32,
        integration_type: IntegrationType,
    ) -> AppResult<Option<Integration>> {
        self.find_active_by_type(workspace_id, integration_type)
            .await
    }
}
