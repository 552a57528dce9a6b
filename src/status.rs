// System status display: database file and table contents.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, config: &Config) -> Result<()> {
    let db_path = config.db_path.as_str();

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    println!("Tables: {}", db.table_count().await?);
    for (table, rows) in db.table_row_counts().await? {
        println!("  {:<16} {:>8} rows", table, rows);
    }

    if config.dataset_path.exists() {
        println!("Dataset: {}", config.dataset_path.display());
    } else {
        println!("Dataset: {} (missing)", config.dataset_path.display());
    }

    match &config.lexicon_path {
        Some(path) => println!("Lexicon: {}", path.display()),
        None => println!("Lexicon: built-in"),
    }

    Ok(())
}

/// Whether the database file exists yet.
pub fn is_initialized(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_missing_db_is_not_initialized() {
        assert!(!is_initialized("/definitely/not/here.db"));
    }
}
