use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default SQLite location, next to the working directory.
pub const DEFAULT_DB_PATH: &str = "./instance/concierge.db";

/// Default location of the labelled review dataset.
pub const DEFAULT_DATASET_PATH: &str = "data/hotel_reviews_dataset.csv";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// CSV used by the dataset analysis
    pub dataset_path: PathBuf,
    /// Optional JSON lexicon replacing the built-in opinion words
    pub lexicon_path: Option<PathBuf>,
    /// Secret for HMAC session token signing (CONCIERGE_SESSION_SECRET env var)
    #[cfg(feature = "web")]
    pub session_secret: String,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default except the session secret, which `serve` checks separately.
    pub fn load() -> Result<Self> {
        let lexicon_path = env::var("CONCIERGE_LEXICON")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            db_path: env::var("CONCIERGE_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            dataset_path: env::var("CONCIERGE_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH)),
            lexicon_path,
            #[cfg(feature = "web")]
            session_secret: env::var("CONCIERGE_SESSION_SECRET").unwrap_or_default(),
        })
    }

    /// Check that a custom lexicon, if configured, actually exists.
    pub fn require_lexicon(&self) -> Result<()> {
        if let Some(path) = &self.lexicon_path {
            if !path.exists() {
                anyhow::bail!(
                    "CONCIERGE_LEXICON points to {}, which does not exist.\n\
                     Unset it to use the built-in lexicon.",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Check that the session secret is set and long enough to sign cookies.
    #[cfg(feature = "web")]
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.len() < 16 {
            anyhow::bail!(
                "CONCIERGE_SESSION_SECRET must be set to at least 16 characters.\n\
                 Add it to your .env file. See .env.example for details."
            );
        }
        Ok(())
    }
}
