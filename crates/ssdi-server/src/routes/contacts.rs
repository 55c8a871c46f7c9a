use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ssdi_core::contact::{Contact, ContactUpdate, NewContact};

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/contacts
pub async fn list_contacts(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = blocking(&app, move |db| db.list_contacts(user_id)).await?;
    Ok(Json(contacts))
}

/// POST /api/contacts: 201 with the stored contact.
pub async fn create_contact(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Json(body): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let now = app.clock.now();
    let contact = blocking(&app, move |db| db.create_contact(user_id, &body, now)).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PATCH /api/contacts/:id: partial update.
pub async fn update_contact(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
    Json(body): Json<ContactUpdate>,
) -> Result<Json<Contact>, AppError> {
    let contact = blocking(&app, move |db| db.update_contact(id, user_id, &body)).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/:id: 204 on success.
pub async fn delete_contact(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    blocking(&app, move |db| db.delete_contact(id, user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
