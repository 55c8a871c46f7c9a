use axum::extract::{Path, State};
use axum::Json;
use ssdi_core::document::{Document, NewDocument};
use ssdi_core::types::DocumentStatus;

use super::blocking;
use super::sections::StatusBody;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/sections/:id/documents
pub async fn list_documents(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(section_id): Path<i64>,
) -> Result<Json<Vec<Document>>, AppError> {
    let docs = blocking(&app, move |db| db.list_documents(section_id, user_id)).await?;
    Ok(Json(docs))
}

/// POST /api/sections/:id/documents: record a document. Supplying a
/// `fileName` marks it uploaded.
pub async fn create_document(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(section_id): Path<i64>,
    Json(body): Json<NewDocument>,
) -> Result<Json<Document>, AppError> {
    let now = app.clock.now();
    let doc = blocking(&app, move |db| {
        db.create_document(section_id, user_id, &body, now)
    })
    .await?;
    Ok(Json(doc))
}

/// PATCH /api/documents/:id/status
pub async fn update_document_status(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Document>, AppError> {
    let status: DocumentStatus = body.status.parse()?;
    let now = app.clock.now();
    let doc = blocking(&app, move |db| {
        db.update_document_status(id, user_id, status, now)
    })
    .await?;
    Ok(Json(doc))
}

/// DELETE /api/documents/:id
pub async fn delete_document(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    blocking(&app, move |db| db.delete_document(id, user_id)).await?;
    Ok(Json(serde_json::json!({ "id": id, "deleted": true })))
}
