// Web server — Axum-based JSON API over the same pipeline the CLI uses.
//
// All routes serve JSON. Errors are `{ "error": message }`.
//
// Auth: stateless HMAC-SHA256 session cookies carrying the user id. No
// session table in the DB.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::sentiment::PolarityScorer;

pub mod auth;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    pub scorer: Arc<dyn PolarityScorer>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    scorer: Arc<dyn PolarityScorer>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        db,
        config: Arc::new(config),
        scorer,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Concierge API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble every route with its middleware.
pub fn build_router(state: AppState) -> Router {
    // Authenticated API routes (require valid session cookie)
    let protected_api = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/analyze", post(handlers::analyze::analyze_single))
        .route("/api/analyze/batch", post(handlers::analyze::analyze_batch))
        .route("/api/analyze/dataset", post(handlers::dataset::analyze_dataset))
        .route("/api/logout", post(handlers::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Public routes (no auth)
    let public_api = Router::new()
        .route("/health", get(health))
        .route("/api/signup", post(handlers::auth::signup))
        .route("/api/login", post(handlers::auth::login));

    Router::new()
        .merge(protected_api)
        .merge(public_api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check, always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// The signed-in user, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}
