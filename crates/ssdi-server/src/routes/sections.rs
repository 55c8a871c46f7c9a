use axum::extract::{Path, State};
use axum::Json;
use ssdi_core::section::Section;
use ssdi_core::types::SectionStatus;

use super::blocking;
use crate::caller::Caller;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// GET /api/sections
pub async fn list_sections(
    State(app): State<AppState>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<Section>>, AppError> {
    let sections = blocking(&app, move |db| db.list_sections(user_id)).await?;
    Ok(Json(sections))
}

/// PATCH /api/sections/:id/status: body `{ "status": "complete" }`.
pub async fn update_section_status(
    State(app): State<AppState>,
    Caller(user_id): Caller,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Section>, AppError> {
    let status: SectionStatus = body.status.parse()?;
    let section = blocking(&app, move |db| db.update_section_status(id, user_id, status)).await?;
    Ok(Json(section))
}
