use axum::extract::{Path, State};
use axum::Json;
use ssdi_core::tracking::{NewTrackingEntry, TrackingEntry};

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/retirement-tracking: the caller's entries, newest first.
pub async fn list_tracking(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<TrackingEntry>>, AppError> {
    let entries = blocking(&app, move |db| db.list_tracking(user_id)).await?;
    Ok(Json(entries))
}

/// POST /api/retirement-tracking: log a communication.
pub async fn create_tracking(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Json(body): Json<NewTrackingEntry>,
) -> Result<Json<TrackingEntry>, AppError> {
    let now = app.clock.now();
    let entry = blocking(&app, move |db| db.create_tracking(user_id, &body, now)).await?;
    Ok(Json(entry))
}

/// DELETE /api/retirement-tracking/:id
pub async fn delete_tracking(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    blocking(&app, move |db| db.delete_tracking(id, user_id)).await?;
    Ok(Json(serde_json::json!({ "id": id, "deleted": true })))
}

/// PATCH /api/retirement-tracking/:id/complete: mark an entry done.
///
/// Responds 404 both for missing entries and for entries owned by someone
/// else.
pub async fn complete_tracking(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
) -> Result<Json<TrackingEntry>, AppError> {
    let now = app.clock.now();
    let entry = blocking(&app, move |db| db.mark_tracking_complete(id, user_id, now)).await?;
    Ok(Json(entry))
}
