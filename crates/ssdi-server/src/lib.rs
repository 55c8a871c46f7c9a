pub mod caller;
pub mod error;
pub mod routes;
pub mod state;

use std::path::Path;

use anyhow::Context;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard
        .route(
            "/api/user/action-items",
            get(routes::action_items::get_action_items),
        )
        .route("/api/user", get(routes::user::get_user))
        .route("/api/progress", get(routes::progress::get_progress))
        // Sections & documents
        .route("/api/sections", get(routes::sections::list_sections))
        .route(
            "/api/sections/{id}/status",
            patch(routes::sections::update_section_status),
        )
        .route(
            "/api/sections/{id}/documents",
            get(routes::documents::list_documents).post(routes::documents::create_document),
        )
        .route(
            "/api/documents/{id}/status",
            patch(routes::documents::update_document_status),
        )
        .route(
            "/api/documents/{id}",
            axum::routing::delete(routes::documents::delete_document),
        )
        // Communication log
        .route(
            "/api/retirement-tracking",
            get(routes::tracking::list_tracking).post(routes::tracking::create_tracking),
        )
        .route(
            "/api/retirement-tracking/{id}",
            axum::routing::delete(routes::tracking::delete_tracking),
        )
        .route(
            "/api/retirement-tracking/{id}/complete",
            patch(routes::tracking::complete_tracking),
        )
        // Contacts
        .route(
            "/api/contacts",
            get(routes::contacts::list_contacts).post(routes::contacts::create_contact),
        )
        .route(
            "/api/contacts/{id}",
            patch(routes::contacts::update_contact).delete(routes::contacts::delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the tracker API server for the project at `root`.
pub async fn serve(root: &Path, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve_on(root, listener).await
}

/// Start the tracker API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(root: &Path, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(AppState::open(root)?);

    tracing::info!("SSDI tracker API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
