// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Analysis, NewAnalysis, User, UserStats};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn table_row_counts(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::schema::table_row_counts(&conn)
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, username, email, password_hash)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_username(&conn, username)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_email(&conn, email)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, user_id)
    }

    async fn insert_analyses(&self, user_id: i64, records: &[NewAnalysis]) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::insert_analyses(&conn, user_id, records)
    }

    async fn get_recent_analyses(&self, user_id: i64, limit: u32) -> Result<Vec<Analysis>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_analyses(&conn, user_id, limit)
    }

    async fn get_user_stats(&self, user_id: i64) -> Result<UserStats> {
        let conn = self.conn.lock().await;
        super::queries::get_user_stats(&conn, user_id)
    }
}
