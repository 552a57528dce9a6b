// POST /api/analyze/dataset — classify the configured CSV dataset.
//
// Uses CONCIERGE_DATASET_PATH; there is no upload. The first few results
// land in the caller's history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::warn;

use crate::pipeline::dataset;
use crate::web::{api_error, AppState, AuthUser};

pub async fn analyze_dataset(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let path = &state.config.dataset_path;
    if !path.exists() {
        return api_error(
            StatusCode::NOT_FOUND,
            &format!("Dataset file not found: {}", path.display()),
        );
    }

    match dataset::run(state.db.as_ref(), state.scorer.as_ref(), user.user_id, path).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            warn!(error = %e, "Dataset analysis failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Error processing dataset: {e}"),
            )
        }
    }
}
