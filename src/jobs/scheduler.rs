//! Cron scheduling for the reminder sweep.
//!
//! Wraps tokio-cron-scheduler to run the booking reminder sweep on the
//! configured expression while the server is up. Overlapping or repeated
//! runs inside one reminder window double-send; the schedule, not the
//! sweep, is responsible for spacing runs.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::error::{AppError, AppResult};
use crate::services::ReminderService;

/// Scheduler handle for the reminder sweep job
pub struct ReminderScheduler {
    scheduler: TokioCronScheduler,
}

impl ReminderScheduler {
    /// Schedules the sweep on the given cron expression and starts the
    /// scheduler.
    pub async fn start(service: Arc<ReminderService>, cron: &str) -> AppResult<Self> {
        let mut scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        let job = Job::new_async(cron, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            Box::pin(async move {
                match service.run_sweep().await {
                    Ok(count) => {
                        tracing::info!(count, "scheduled reminder sweep finished");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "scheduled reminder sweep failed");
                    }
                }
            })
        })
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid cron expression '{}': {}", cron, e),
        })?;

        scheduler.add(job).await.map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

        scheduler.start().await.map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

        tracing::info!(cron, "reminder schedule started");
        Ok(Self { scheduler })
    }

    /// Stops the scheduler gracefully.
    pub async fn shutdown(mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })
    }
}
