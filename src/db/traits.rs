// Database trait — backend-agnostic async interface for all DB operations.
//
// The only implementor today is SqliteDatabase (rusqlite behind a tokio
// Mutex). Methods are async so the web handlers and CLI share one
// interface and a native async backend can slot in later.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Analysis, NewAnalysis, User, UserStats};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Row count per table, for the status display.
    async fn table_row_counts(&self) -> Result<Vec<(String, i64)>>;

    // --- Users ---

    /// Insert a new user and return its ID.
    async fn create_user(&self, username: &str, email: &str, password_hash: &str)
        -> Result<i64>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    // --- Analyses ---

    /// Store analysis records for a user atomically. Returns rows written.
    async fn insert_analyses(&self, user_id: i64, records: &[NewAnalysis]) -> Result<usize>;

    /// A user's most recent analyses, newest first.
    async fn get_recent_analyses(&self, user_id: i64, limit: u32) -> Result<Vec<Analysis>>;

    /// Totals per sentiment label for a user.
    async fn get_user_stats(&self, user_id: i64) -> Result<UserStats>;
}
