//! Identity of the user a request acts for.
//!
//! The caller is named by the `X-User-Id` header. Requests without it act
//! for `server.default_user_id` from the project config. Every store call a
//! handler makes is scoped to this id.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub i64);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match user_id_from_headers(&parts.headers)? {
            Some(id) => Ok(Caller(id)),
            None => Ok(Caller(state.default_user_id)),
        }
    }
}

fn user_id_from_headers(headers: &HeaderMap) -> Result<Option<i64>, AppError> {
    let Some(raw) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .map(Some)
        .ok_or_else(|| AppError::bad_request("X-User-Id must be a positive integer"))
}
