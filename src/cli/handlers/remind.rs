//! One-shot reminder sweep command handler.

use crate::config::Settings;
use crate::db::establish_async_connection_pool;
use crate::state::AppState;

/// Runs a single reminder sweep against the configured database and prints
/// the number of reminders sent.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = establish_async_connection_pool(&settings.database).await?;
    let state = AppState::new(pool, settings.application.clone());

    let count = state.services.reminders.run_sweep().await?;
    println!("Sent {} reminder(s)", count);
    Ok(())
}
