// User accounts — registration, password hashing, login checks.
//
// Passwords are stored as `sha256$<salt_hex>$<digest_hex>` where the digest
// is SHA-256 iterated HASH_ROUNDS times over salt || password.

use anyhow::Result;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::db::models::User;
use crate::db::Database;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

const HASH_SCHEME: &str = "sha256";
const HASH_ROUNDS: u32 = 10_000;
const SALT_BYTES: usize = 16;

/// Why a registration or login attempt was refused. The message is safe to
/// show to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// A registration request, as typed by the user.
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Validate the form fields without touching storage.
pub fn validate_registration(reg: &Registration<'_>) -> Result<(), AccountError> {
    if reg.username.trim().is_empty() || reg.email.trim().is_empty() || reg.password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    if reg.password != reg.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }
    if reg.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort);
    }
    Ok(())
}

/// Register a new user.
///
/// Refusals come back as an [`AccountError`] inside the `anyhow::Error`, so
/// callers can `downcast_ref` to tell user mistakes from storage failures.
pub async fn register(db: &dyn Database, reg: &Registration<'_>) -> Result<User> {
    validate_registration(reg)?;
    let username = reg.username.trim();
    let email = reg.email.trim();

    if db.get_user_by_username(username).await?.is_some() {
        return Err(AccountError::UsernameTaken.into());
    }
    if db.get_user_by_email(email).await?.is_some() {
        return Err(AccountError::EmailTaken.into());
    }

    let hash = hash_password(reg.password);
    // A concurrent signup can win the race past the checks above.
    let id = db
        .create_user(username, email, &hash)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(taken) => taken.into(),
            None => e,
        })?;
    info!(user_id = id, username, "Registered user");

    db.get_user(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User {id} vanished after insert"))
}

/// Map a UNIQUE constraint failure on `users` to the matching refusal.
fn unique_violation(err: &anyhow::Error) -> Option<AccountError> {
    match err.downcast_ref::<rusqlite::Error>()? {
        rusqlite::Error::SqliteFailure(code, Some(msg))
            if code.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            if msg.contains("users.username") {
                Some(AccountError::UsernameTaken)
            } else if msg.contains("users.email") {
                Some(AccountError::EmailTaken)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Check a username/password pair. Unknown users and wrong passwords are
/// indistinguishable to the caller.
pub async fn authenticate(db: &dyn Database, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::InvalidCredentials.into());
    }
    match db.get_user_by_username(username).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        _ => Err(AccountError::InvalidCredentials.into()),
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt);
    let digest = digest(&salt, password);
    format!("{HASH_SCHEME}${}${}", hex::encode(salt), hex::encode(digest))
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(digest_hex)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let expected = hex::encode(digest(&salt, password));
    constant_time_eq(&expected, digest_hex)
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    for _ in 1..HASH_ROUNDS {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(out);
        out.copy_from_slice(&hasher.finalize());
    }
    out
}

/// Constant-time string comparison to prevent timing attacks.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn reg<'a>(username: &'a str, email: &'a str, password: &'a str) -> Registration<'a> {
        Registration {
            username,
            email,
            password,
            confirm_password: password,
        }
    }

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("hunter22");
        assert!(hash.starts_with("sha256$"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        assert_ne!(hash_password("hunter22"), hash_password("hunter22"));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "sha256$zz$00"));
        assert!(!verify_password("x", "md5$00$00"));
    }

    #[test]
    fn test_validation_messages() {
        let missing = reg("", "a@x", "secret1");
        assert_eq!(validate_registration(&missing), Err(AccountError::MissingFields));

        let mut mismatch = reg("ann", "a@x", "secret1");
        mismatch.confirm_password = "secret2";
        assert_eq!(validate_registration(&mismatch), Err(AccountError::PasswordMismatch));

        let short = reg("ann", "a@x", "abc");
        assert_eq!(validate_registration(&short), Err(AccountError::PasswordTooShort));
        assert_eq!(
            AccountError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let db = db::open_in_memory().unwrap();
        let user = register(db.as_ref(), &reg(" ann ", "ann@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.username, "ann");

        let authed = authenticate(db.as_ref(), "ann", "secret1").await.unwrap();
        assert_eq!(authed.id, user.id);

        let err = authenticate(db.as_ref(), "ann", "wrong!!").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<AccountError>(),
            Some(&AccountError::InvalidCredentials)
        );
        let err = authenticate(db.as_ref(), "nobody", "secret1").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<AccountError>(),
            Some(&AccountError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_register_duplicates() {
        let db = db::open_in_memory().unwrap();
        register(db.as_ref(), &reg("ann", "ann@example.com", "secret1"))
            .await
            .unwrap();

        let err = register(db.as_ref(), &reg("ann", "new@example.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<AccountError>(), Some(&AccountError::UsernameTaken));

        let err = register(db.as_ref(), &reg("bob", "ann@example.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<AccountError>(), Some(&AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_insert_conflicts_map_to_refusals() {
        // Inserts that slip past the lookups in `register` hit the UNIQUE
        // constraints instead.
        let db = db::open_in_memory().unwrap();
        db.create_user("ann", "ann@example.com", "h").await.unwrap();

        let err = db.create_user("ann", "new@example.com", "h").await.unwrap_err();
        assert_eq!(unique_violation(&err), Some(AccountError::UsernameTaken));

        let err = db.create_user("bob", "ann@example.com", "h").await.unwrap_err();
        assert_eq!(unique_violation(&err), Some(AccountError::EmailTaken));

        assert_eq!(unique_violation(&anyhow::anyhow!("disk full")), None);
    }
}
