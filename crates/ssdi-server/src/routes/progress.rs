use axum::extract::State;
use axum::Json;
use ssdi_core::progress::Progress;

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/progress: section completion summary.
pub async fn get_progress(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Progress>, AppError> {
    let progress = blocking(&app, move |db| db.progress(user_id)).await?;
    Ok(Json(progress))
}
