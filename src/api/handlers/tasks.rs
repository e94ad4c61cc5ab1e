//! Task trigger handlers.

use axum::Json;
use axum::extract::State;

use crate::api::dto::ReminderSweepResponse;
use crate::state::AppState;

/// GET /api/tasks/send-reminders - manual trigger for the reminder sweep.
///
/// Meant for an external cron hitting the service, or an operator running
/// the sweep by hand. Always answers 200; the JSON body carries the
/// outcome.
pub async fn send_reminders(State(state): State<AppState>) -> Json<ReminderSweepResponse> {
    match state.services.reminders.run_sweep().await {
        Ok(count) => Json(ReminderSweepResponse::completed(count)),
        Err(e) => {
            tracing::error!(error = %e, "manual reminder sweep failed");
            Json(ReminderSweepResponse::failed(e.to_string()))
        }
    }
}
