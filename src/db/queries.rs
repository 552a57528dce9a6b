// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Analysis, NewAnalysis, User, UserStats};
use crate::sentiment::distribution::distribution_from_labels;

// --- Users ---

/// Insert a new user and return its ID.
pub fn create_user(
    conn: &Connection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)",
        params![username, email, password_hash],
    )?;
    Ok(conn.last_insert_rowid())
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

/// Look up a user by exact username.
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
    let user = conn
        .query_row(&sql, params![username], user_from_row)
        .optional()?;
    Ok(user)
}

/// Look up a user by exact email.
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
    let user = conn
        .query_row(&sql, params![email], user_from_row)
        .optional()?;
    Ok(user)
}

/// Look up a user by ID.
pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    let user = conn
        .query_row(&sql, params![user_id], user_from_row)
        .optional()?;
    Ok(user)
}

// --- Analyses ---

/// Store analysis records for a user in a single transaction.
/// Returns the number of rows written.
pub fn insert_analyses(conn: &Connection, user_id: i64, records: &[NewAnalysis]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO analyses (user_id, review_text, sentiment, polarity, subjectivity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for record in records {
            stmt.execute(params![
                user_id,
                record.review_text,
                record.sentiment,
                record.polarity,
                record.subjectivity,
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}

/// A user's most recent analyses, newest first.
pub fn get_recent_analyses(conn: &Connection, user_id: i64, limit: u32) -> Result<Vec<Analysis>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, review_text, sentiment, polarity, subjectivity, created_at
         FROM analyses
         WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![user_id, limit], |row| {
        Ok(Analysis {
            id: row.get(0)?,
            user_id: row.get(1)?,
            review_text: row.get(2)?,
            sentiment: row.get(3)?,
            polarity: row.get(4)?,
            subjectivity: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;

    let mut analyses = Vec::new();
    for row in rows {
        analyses.push(row?);
    }
    Ok(analyses)
}

/// Totals per sentiment for one user. Labels outside the three known
/// buckets are counted as neutral.
pub fn get_user_stats(conn: &Connection, user_id: i64) -> Result<UserStats> {
    let mut stmt = conn.prepare(
        "SELECT sentiment, COUNT(*) FROM analyses WHERE user_id = ?1 GROUP BY sentiment",
    )?;
    let grouped: Vec<(Option<String>, i64)> = stmt
        .query_map(params![user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<_>>()?;

    let labels = grouped.iter().flat_map(|(label, count)| {
        std::iter::repeat_n(label.as_deref(), *count as usize)
    });
    let distribution = distribution_from_labels(labels);

    Ok(UserStats {
        total: distribution.total(),
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn count_rows(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn record(text: &str, sentiment: &str, polarity: f64) -> NewAnalysis {
        NewAnalysis {
            review_text: text.to_string(),
            sentiment: sentiment.to_string(),
            polarity,
            subjectivity: Some(0.5),
        }
    }

    #[test]
    fn test_user_round_trip() {
        let conn = test_conn();
        let id = create_user(&conn, "ann", "ann@example.com", "hash").unwrap();

        let by_name = get_user_by_username(&conn, "ann").unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.email, "ann@example.com");

        let by_email = get_user_by_email(&conn, "ann@example.com").unwrap().unwrap();
        assert_eq!(by_email.username, "ann");

        assert!(get_user(&conn, id).unwrap().is_some());
        assert!(get_user_by_username(&conn, "bob").unwrap().is_none());
        assert_eq!(count_rows(&conn, "users"), 1);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let conn = test_conn();
        create_user(&conn, "ann", "ann@example.com", "h").unwrap();
        assert!(create_user(&conn, "ann", "other@example.com", "h").is_err());
    }

    #[test]
    fn test_recent_analyses_newest_first() {
        let conn = test_conn();
        let id = create_user(&conn, "ann", "ann@example.com", "h").unwrap();
        insert_analyses(
            &conn,
            id,
            &[
                record("first", "positive", 0.5),
                record("second", "negative", -0.5),
                record("third", "neutral", 0.0),
            ],
        )
        .unwrap();

        let recent = get_recent_analyses(&conn, id, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].review_text, "third");
        assert_eq!(recent[1].review_text, "second");
        assert_eq!(count_rows(&conn, "analyses"), 3);
    }

    #[test]
    fn test_analyses_scoped_to_user() {
        let conn = test_conn();
        let ann = create_user(&conn, "ann", "ann@example.com", "h").unwrap();
        let bob = create_user(&conn, "bob", "bob@example.com", "h").unwrap();
        insert_analyses(&conn, ann, &[record("mine", "positive", 0.3)]).unwrap();

        assert!(get_recent_analyses(&conn, bob, 10).unwrap().is_empty());
        assert_eq!(get_user_stats(&conn, bob).unwrap(), UserStats::default());
    }

    #[test]
    fn test_user_stats_bucket_unknown_labels_as_neutral() {
        let conn = test_conn();
        let id = create_user(&conn, "ann", "ann@example.com", "h").unwrap();
        insert_analyses(
            &conn,
            id,
            &[
                record("a", "positive", 0.5),
                record("b", "positive", 0.2),
                record("c", "negative", -0.1),
                record("d", "mixed", 0.0),
            ],
        )
        .unwrap();

        let stats = get_user_stats(&conn, id).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distribution.positive, 2);
        assert_eq!(stats.distribution.negative, 1);
        assert_eq!(stats.distribution.neutral, 1);
    }
}
