// GET /api/dashboard — the caller's recent analyses and label totals.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::warn;

use crate::web::{api_error, AppState, AuthUser};

const RECENT_LIMIT: u32 = 10;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let loaded = async {
        let account = state.db.get_user(user.user_id).await?;
        let recent = state.db.get_recent_analyses(user.user_id, RECENT_LIMIT).await?;
        let stats = state.db.get_user_stats(user.user_id).await?;
        anyhow::Ok((account, recent, stats))
    }
    .await;

    match loaded {
        // Valid cookie for a user that no longer exists
        Ok((None, _, _)) => api_error(StatusCode::UNAUTHORIZED, "Authentication required"),
        Ok((Some(account), recent, stats)) => Json(serde_json::json!({
            "user": account,
            "recent_analyses": recent,
            "stats": stats,
        }))
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load dashboard");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load dashboard")
        }
    }
}
