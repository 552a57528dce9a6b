// Batch classification: ordered, blank entries skipped.

use anyhow::Result;
use tracing::debug;

use super::classify::{classify, SentimentResult};
use super::traits::PolarityScorer;

/// Classify every non-blank review in order.
///
/// Entries that are empty or whitespace-only are dropped from the output
/// rather than reported as neutral. Each result carries the review text
/// exactly as it was passed in.
pub fn classify_batch<S: AsRef<str>>(
    scorer: &dyn PolarityScorer,
    reviews: &[S],
) -> Result<Vec<SentimentResult>> {
    let mut results = Vec::with_capacity(reviews.len());
    for review in reviews {
        let review = review.as_ref();
        if review.trim().is_empty() {
            continue;
        }
        results.push(classify(scorer, review)?.with_review(review));
    }

    debug!(
        submitted = reviews.len(),
        classified = results.len(),
        scorer = scorer.name(),
        "Classified batch"
    );
    Ok(results)
}
