// Dataset analysis: load the labelled CSV, classify it, keep a sample.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::dataset::loader::load_dataset;
use crate::dataset::stats::DatasetReport;
use crate::dataset::build_report;
use crate::db::models::NewAnalysis;
use crate::db::Database;
use crate::sentiment::PolarityScorer;

/// How many dataset results are saved to the user's history.
pub const SAVED_SAMPLE: usize = 10;

/// Longest review text stored from the dataset, in characters.
pub const MAX_STORED_CHARS: usize = 500;

/// Run the dataset analysis for a user and store the first few results.
pub async fn run(
    db: &dyn Database,
    scorer: &dyn PolarityScorer,
    user_id: i64,
    path: &Path,
) -> Result<DatasetReport> {
    let rows = load_dataset(path)?;
    let report = build_report(scorer, &rows)?;
    save_sample(db, user_id, &report).await?;
    Ok(report)
}

/// Store the first `SAVED_SAMPLE` results of a report, text truncated.
pub async fn save_sample(db: &dyn Database, user_id: i64, report: &DatasetReport) -> Result<usize> {
    let records: Vec<NewAnalysis> = report
        .results
        .iter()
        .take(SAVED_SAMPLE)
        .map(|r| NewAnalysis::from_result(&r.result, Some(MAX_STORED_CHARS)))
        .collect();
    let saved = db.insert_analyses(user_id, &records).await?;
    info!(user_id, saved, "Saved dataset sample");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::DatasetRow;
    use crate::db;
    use crate::sentiment::lexicon::LexiconScorer;

    #[tokio::test]
    async fn test_sample_is_capped_and_truncated() {
        let db = db::open_in_memory().unwrap();
        let id = db.create_user("ann", "ann@example.com", "h").await.unwrap();

        let long_text = format!("wonderful {}", "x".repeat(600));
        let rows: Vec<DatasetRow> = (0..12)
            .map(|i| DatasetRow {
                review_id: Some(i),
                text: Some(long_text.clone()),
                sentiment: Some("positive".to_string()),
                primary_aspect: None,
            })
            .collect();

        let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();
        assert_eq!(report.total_reviews, 12);

        let saved = save_sample(db.as_ref(), id, &report).await.unwrap();
        assert_eq!(saved, SAVED_SAMPLE);

        let stored = db.get_recent_analyses(id, 50).await.unwrap();
        assert_eq!(stored.len(), SAVED_SAMPLE);
        assert!(stored
            .iter()
            .all(|a| a.review_text.chars().count() == MAX_STORED_CHARS));
    }

    #[tokio::test]
    async fn test_missing_dataset_file() {
        let db = db::open_in_memory().unwrap();
        let err = run(
            db.as_ref(),
            &LexiconScorer::builtin(),
            1,
            Path::new("/definitely/not/here.csv"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Dataset file not found"));
    }
}
