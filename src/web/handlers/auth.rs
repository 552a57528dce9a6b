// Auth handlers — POST /api/signup, /api/login and /api/logout.
//
// Signup and login go through `accounts`, which owns the validation rules
// and password hashing. Login sets a signed HMAC session cookie carrying
// the user id; logout clears it.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::accounts::{self, AccountError, Registration};
use crate::web::auth::{clear_cookie_header, create_token, set_cookie_header};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// POST /api/signup — register a new user.
///
/// 201 with the user on success, 400 for invalid fields, 409 when the
/// username or email is taken.
pub async fn signup(State(state): State<AppState>, Json(body): Json<SignupRequest>) -> Response {
    let registration = Registration {
        username: &body.username,
        email: &body.email,
        password: &body.password,
        confirm_password: &body.confirm_password,
    };

    match accounts::register(state.db.as_ref(), &registration).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Registration successful! Please log in.",
                "user": user,
            })),
        )
            .into_response(),
        Err(e) => match e.downcast_ref::<AccountError>() {
            Some(err @ (AccountError::UsernameTaken | AccountError::EmailTaken)) => {
                api_error(StatusCode::CONFLICT, &err.to_string())
            }
            Some(err) => api_error(StatusCode::BAD_REQUEST, &err.to_string()),
            None => {
                warn!(error = %e, "Signup failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Registration failed")
            }
        },
    }
}

/// POST /api/login — authenticate with username and password.
///
/// On success: returns 200 with a signed session cookie.
/// On failure: returns 401.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let user = match accounts::authenticate(state.db.as_ref(), &body.username, &body.password).await
    {
        Ok(user) => user,
        Err(e) => {
            return match e.downcast_ref::<AccountError>() {
                Some(err) => api_error(StatusCode::UNAUTHORIZED, &err.to_string()),
                None => {
                    warn!(error = %e, "Login failed");
                    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Login failed")
                }
            };
        }
    };

    let token = create_token(&state.config.session_secret, user.id);
    let cookie = set_cookie_header(&token);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Authenticated", "user": user })),
    )
        .into_response()
}

/// POST /api/logout — clear the session cookie.
pub async fn logout() -> Response {
    let cookie = clear_cookie_header();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "You have been logged out" })),
    )
        .into_response()
}
