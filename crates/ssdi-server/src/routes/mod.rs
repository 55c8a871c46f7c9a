pub mod action_items;
pub mod contacts;
pub mod documents;
pub mod progress;
pub mod sections;
pub mod tracking;
pub mod user;

use ssdi_core::Database;

use crate::error::AppError;
use crate::state::AppState;

/// Run a store call on the blocking pool.
pub(crate) async fn blocking<T, F>(app: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Database) -> ssdi_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = app.db.clone();
    let result = tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(result)
}
