use axum::extract::State;
use axum::Json;
use ssdi_core::user::User;

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/user: the caller's profile.
pub async fn get_user(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<User>, AppError> {
    let user = blocking(&app, move |db| db.get_user(user_id)).await?;
    Ok(Json(user))
}
