// Single and batch analysis for a signed-in user.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::db::models::NewAnalysis;
use crate::db::Database;
use crate::sentiment::{classify, classify_batch, distribution, Distribution, PolarityScorer};
use crate::sentiment::SentimentResult;

/// Raised when a request contains nothing to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Please enter a review to analyze")]
pub struct NothingToAnalyze;

/// Classified reviews plus their label tally.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub results: Vec<SentimentResult>,
    pub distribution: Distribution,
}

/// Split a multi-line submission into trimmed, non-blank reviews.
pub fn split_reviews(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Classify and store a single review.
pub async fn analyze_single(
    db: &dyn Database,
    scorer: &dyn PolarityScorer,
    user_id: i64,
    text: &str,
) -> Result<AnalysisOutcome> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NothingToAnalyze.into());
    }

    let result = classify(scorer, text)?.with_review(text);
    db.insert_analyses(user_id, &[NewAnalysis::from_result(&result, None)])
        .await?;

    info!(
        user_id,
        sentiment = %result.sentiment,
        polarity = result.polarity,
        "Analyzed review"
    );

    Ok(AnalysisOutcome {
        distribution: Distribution::single(result.sentiment),
        results: vec![result],
    })
}

/// Classify and store one review per non-blank line of `raw`.
pub async fn analyze_batch(
    db: &dyn Database,
    scorer: &dyn PolarityScorer,
    user_id: i64,
    raw: &str,
) -> Result<AnalysisOutcome> {
    analyze_reviews(db, scorer, user_id, &split_reviews(raw)).await
}

/// Classify and store a list of reviews. Blank entries are skipped; if
/// nothing is left the request is refused.
pub async fn analyze_reviews<S: AsRef<str> + Sync>(
    db: &dyn Database,
    scorer: &dyn PolarityScorer,
    user_id: i64,
    reviews: &[S],
) -> Result<AnalysisOutcome> {
    let results = classify_batch(scorer, reviews)?;
    if results.is_empty() {
        return Err(NothingToAnalyze.into());
    }

    let records: Vec<NewAnalysis> = results
        .iter()
        .map(|r| NewAnalysis::from_result(r, None))
        .collect();
    db.insert_analyses(user_id, &records).await?;

    let dist = distribution(&results);
    info!(
        user_id,
        reviews = results.len(),
        positive = dist.positive,
        negative = dist.negative,
        neutral = dist.neutral,
        "Analyzed batch"
    );

    Ok(AnalysisOutcome {
        results,
        distribution: dist,
    })
}
