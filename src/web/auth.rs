// Auth middleware — stateless HMAC-SHA256 session cookie validation.
//
// Session token format: {user_id}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{user_id}.{timestamp_secs}.{nonce_hex}" signed with
// CONCIERGE_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// Login flow:
//   POST /api/login { username, password } → accounts::authenticate
//     success: set concierge_session cookie with new HMAC token
//     failure: 401
//
// Auth check (this middleware):
//   extract concierge_session cookie → parse → verify HMAC → verify age → allow

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{AppState, AuthUser};
use crate::accounts::constant_time_eq;

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "concierge_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

/// Build a new session token for `user_id` signed with `secret`.
///
/// Returns the raw cookie value (the token string, not the full Set-Cookie header).
pub fn create_token(secret: &str, user_id: i64) -> String {
    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{user_id}.{}.{nonce}", now_secs());
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the user id if the HMAC is valid and the
/// token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<i64> {
    let parts: Vec<&str> = token.split('.').collect();
    let [user_id, timestamp, nonce, provided_sig] = parts.as_slice() else {
        return None;
    };

    let payload = format!("{user_id}.{timestamp}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if expected_sig.is_empty() || !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let timestamp = timestamp.parse::<u64>().ok()?;
    if now_secs().saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }
    user_id.parse::<i64>().ok()
}

/// Axum middleware: reject requests without a valid session cookie with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(user_id) = session_user(request.headers(), &state.config.session_secret) else {
        return super::api_error(
            axum::http::StatusCode::UNAUTHORIZED,
            "Authentication required",
        );
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str) -> String {
    format!(
        "{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

/// Read the session cookie and return the user id it was issued for.
pub fn session_user(headers: &HeaderMap, secret: &str) -> Option<i64> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name.trim() == COOKIE_NAME {
                return verify_token(secret, value.trim());
            }
        }
    }
    None
}

// --- Private helpers ---

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Empty when the key is rejected, which `verify_token` treats as a mismatch.
fn hmac_sign(secret: &str, payload: &str) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test_secret_32_bytes_long_enough!";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(SECRET, 42);
        assert_eq!(verify_token(SECRET, &token), Some(42));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret", 1);
        assert_eq!(verify_token("wrong_secret", &token), None);
    }

    #[test]
    fn test_swapped_user_id_rejected() {
        let token = create_token(SECRET, 1);
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("2.{rest}");
        assert_eq!(verify_token(SECRET, &forged), None);
    }

    #[test]
    fn test_expired_token_rejected() {
        let stale = now_secs() - SESSION_TTL_SECS - 1;
        let payload = format!("7.{stale}.abcd");
        let token = format!("{payload}.{}", hmac_sign(SECRET, &payload));
        assert_eq!(verify_token(SECRET, &token), None);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(verify_token(SECRET, "not.a.valid.token.format"), None);
        assert_eq!(verify_token(SECRET, ""), None);
        assert_eq!(verify_token(SECRET, "only.three.parts"), None);
    }

    #[test]
    fn test_session_user_from_cookie_header() {
        let token = create_token(SECRET, 9);
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {COOKIE_NAME}={token}")).unwrap(),
        );
        assert_eq!(session_user(&headers, SECRET), Some(9));
        assert_eq!(session_user(&HeaderMap::new(), SECRET), None);
    }

    #[test]
    fn test_cookie_headers() {
        assert!(set_cookie_header("tok").starts_with("concierge_session=tok; HttpOnly"));
        assert!(clear_cookie_header().contains("Max-Age=0"));
    }
}
