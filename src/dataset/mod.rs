// Labelled dataset analysis — classify every review in the bundled CSV and
// compare predictions against the human labels.

pub mod loader;
pub mod stats;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::sentiment::{classify_batch, distribution, PolarityScorer};
use loader::DatasetRow;
use stats::{DatasetReport, DatasetResult, TOP_ASPECTS};

/// Classify the dataset and compute its report.
///
/// Rows without review text are dropped before classification; every
/// remaining result keeps the id, ground truth and aspect of its own row.
pub fn build_report(scorer: &dyn PolarityScorer, rows: &[DatasetRow]) -> Result<DatasetReport> {
    let kept: Vec<&DatasetRow> = rows.iter().filter(|r| !r.is_blank()).collect();
    let texts: Vec<&str> = kept
        .iter()
        .map(|r| r.text.as_deref().unwrap_or_default())
        .collect();

    let classified = classify_batch(scorer, &texts)?;
    let dist = distribution(&classified);
    let avg_polarity = stats::average_polarity(&classified);

    let results: Vec<DatasetResult> = classified
        .into_iter()
        .zip(kept)
        .map(|(result, row)| DatasetResult {
            result,
            review_id: row.review_id,
            actual_sentiment: row.sentiment.clone(),
            primary_aspect: row.primary_aspect.clone(),
        })
        .collect();

    let accuracy = stats::accuracy(results.iter().filter_map(|r| {
        r.actual_sentiment
            .as_deref()
            .map(|actual| (actual, r.result.sentiment))
    }));

    let top_aspects = stats::top_aspects(
        rows.iter().filter_map(|r| r.primary_aspect.as_deref()),
        TOP_ASPECTS,
    );

    info!(
        rows = rows.len(),
        classified = results.len(),
        accuracy,
        avg_polarity,
        "Dataset analysis complete"
    );

    Ok(DatasetReport {
        total_reviews: results.len(),
        results,
        distribution: dist,
        accuracy,
        top_aspects,
        avg_polarity,
        generated_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::lexicon::LexiconScorer;
    use crate::sentiment::SentimentLabel;

    fn row(id: i64, text: &str, sentiment: &str, aspect: &str) -> DatasetRow {
        DatasetRow {
            review_id: Some(id),
            text: Some(text.to_string()),
            sentiment: Some(sentiment.to_string()),
            primary_aspect: Some(aspect.to_string()),
        }
    }

    #[test]
    fn test_blank_rows_do_not_shift_ground_truth() {
        let rows = vec![
            row(1, "   ", "Positive", "Staff"),
            row(2, "terrible dirty room", "Negative", "Cleanliness"),
            row(3, "wonderful staff", "Positive", "Staff"),
        ];
        let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();
        assert_eq!(report.total_reviews, 2);
        assert_eq!(report.results[0].review_id, Some(2));
        assert_eq!(report.results[0].result.sentiment, SentimentLabel::Negative);
        assert_eq!(report.results[1].review_id, Some(3));
        assert_eq!(report.accuracy, 100.0);
        // Aspects are counted over every row, blank text or not
        assert_eq!(report.top_aspects[0], ("Staff".to_string(), 2));
    }

    #[test]
    fn test_empty_dataset() {
        let report = build_report(&LexiconScorer::builtin(), &[]).unwrap();
        assert_eq!(report.total_reviews, 0);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.avg_polarity, 0.0);
        assert_eq!(report.distribution.total(), 0);
        assert!(report.top_aspects.is_empty());
    }
}
