// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::sentiment::{Distribution, SentimentResult};

/// A registered user. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// A stored analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub user_id: i64,
    pub review_text: String,
    /// Stored as text; read back through `SentimentLabel::parse_or_neutral`
    pub sentiment: String,
    pub polarity: f64,
    pub subjectivity: Option<f64>,
    pub created_at: String,
}

/// An analysis about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub review_text: String,
    pub sentiment: String,
    pub polarity: f64,
    pub subjectivity: Option<f64>,
}

impl NewAnalysis {
    /// Build a record from a classified review, truncating the stored text
    /// to `max_chars` characters when given.
    pub fn from_result(result: &SentimentResult, max_chars: Option<usize>) -> Self {
        let review_text = match max_chars {
            Some(max) => result.review.chars().take(max).collect(),
            None => result.review.clone(),
        };
        Self {
            review_text,
            sentiment: result.sentiment.as_str().to_string(),
            polarity: result.polarity,
            subjectivity: Some(result.subjectivity),
        }
    }
}

/// Per-user totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: u64,
    #[serde(flatten)]
    pub distribution: Distribution,
}
