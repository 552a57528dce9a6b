// POST /api/analyze       — one review
// POST /api/analyze/batch — newline-separated reviews

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::warn;

use crate::pipeline::analyze::{self, NothingToAnalyze};
use crate::sentiment::Classification;
use crate::web::{api_error, AppState, AuthUser};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    reviews: String,
}

pub async fn analyze_single(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    if body.text.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "No text provided");
    }

    match analyze::analyze_single(
        state.db.as_ref(),
        state.scorer.as_ref(),
        user.user_id,
        &body.text,
    )
    .await
    {
        // Flat {sentiment, polarity, subjectivity}
        Ok(outcome) => match outcome.results.first() {
            Some(result) => Json(Classification {
                sentiment: result.sentiment,
                polarity: result.polarity,
                subjectivity: result.subjectivity,
            })
            .into_response(),
            None => api_error(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed"),
        },
        Err(e) => analysis_error(e),
    }
}

pub async fn analyze_batch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<BatchRequest>,
) -> Response {
    match analyze::analyze_batch(
        state.db.as_ref(),
        state.scorer.as_ref(),
        user.user_id,
        &body.reviews,
    )
    .await
    {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => analysis_error(e),
    }
}

fn analysis_error(e: anyhow::Error) -> Response {
    if e.downcast_ref::<NothingToAnalyze>().is_some() {
        return api_error(StatusCode::BAD_REQUEST, &e.to_string());
    }
    warn!(error = %e, "Analysis failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
}
