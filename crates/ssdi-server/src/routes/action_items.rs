use axum::extract::State;
use axum::Json;
use ssdi_core::action_items::{aggregate, ActionItems, SourceRows};

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/user/action-items: prioritized dashboard items for the caller.
///
/// The four reads share one store snapshot; if any fails the request fails
/// and no partial result is returned.
pub async fn get_action_items(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<ActionItems>, AppError> {
    let now = app.clock.now();
    let rows = blocking(&app, move |db| SourceRows::read(db, user_id, now)).await?;
    Ok(Json(aggregate(rows, now)))
}
