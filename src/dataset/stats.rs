// Aggregate statistics over a classified dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sentiment::classify::{round3, SentimentLabel, SentimentResult};
use crate::sentiment::distribution::Distribution;

/// How many aspects the dataset report lists.
pub const TOP_ASPECTS: usize = 10;

/// A classified dataset row, with whatever ground truth the row carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetResult {
    #[serde(flatten)]
    pub result: SentimentResult,
    pub review_id: Option<i64>,
    pub actual_sentiment: Option<String>,
    pub primary_aspect: Option<String>,
}

/// Everything the dataset view reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub results: Vec<DatasetResult>,
    pub distribution: Distribution,
    /// Percentage of labelled rows predicted correctly, 2 decimals
    pub accuracy: f64,
    pub total_reviews: usize,
    /// (aspect, count), most frequent first
    pub top_aspects: Vec<(String, usize)>,
    /// 3 decimals
    pub avg_polarity: f64,
    pub generated_at: String,
}

/// Compare a ground-truth label with a prediction. "mixed" ground truth
/// counts as neutral; comparison is case-insensitive.
pub fn labels_agree(actual: &str, predicted: SentimentLabel) -> bool {
    let actual = actual.trim().to_lowercase();
    let actual = if actual == "mixed" {
        "neutral"
    } else {
        actual.as_str()
    };
    actual == predicted.as_str()
}

/// Accuracy over (ground truth, prediction) pairs, as a percentage rounded
/// to 2 decimals. Zero when there is nothing to compare.
pub fn accuracy<'a, I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (&'a str, SentimentLabel)>,
{
    let mut correct = 0usize;
    let mut total = 0usize;
    for (actual, predicted) in pairs {
        if labels_agree(actual, predicted) {
            correct += 1;
        }
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let pct = correct as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Mean polarity rounded to 3 decimals, 0 for an empty set.
pub fn average_polarity(results: &[SentimentResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let sum: f64 = results.iter().map(|r| r.polarity).sum();
    round3(sum / results.len() as f64)
}

/// Count '&'-separated aspect tags and return the `limit` most common.
///
/// Ties keep first-encountered order. Empty fragments ("Staff & ") are
/// ignored.
pub fn top_aspects<'a, I>(aspect_cells: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for cell in aspect_cells {
        for aspect in cell.split('&').map(str::trim).filter(|a| !a.is_empty()) {
            match index.get(aspect) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(aspect.to_string(), order.len());
                    order.push((aspect.to_string(), 1));
                }
            }
        }
    }

    // sort_by is stable, so equal counts stay in insertion order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(polarity: f64) -> SentimentResult {
        SentimentResult {
            sentiment: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity: 0.0,
            review: String::new(),
        }
    }

    #[test]
    fn test_mixed_counts_as_neutral() {
        assert!(labels_agree("mixed", SentimentLabel::Neutral));
        assert!(labels_agree("Mixed", SentimentLabel::Neutral));
        assert!(!labels_agree("mixed", SentimentLabel::Positive));
        assert!(labels_agree("Positive", SentimentLabel::Positive));
    }

    #[test]
    fn test_accuracy_rounding() {
        let pairs = [
            ("positive", SentimentLabel::Positive),
            ("negative", SentimentLabel::Positive),
            ("mixed", SentimentLabel::Neutral),
        ];
        assert_eq!(accuracy(pairs), 66.67);
    }

    #[test]
    fn test_accuracy_empty_is_zero() {
        assert_eq!(accuracy(std::iter::empty::<(&str, SentimentLabel)>()), 0.0);
    }

    #[test]
    fn test_unknown_ground_truth_counts_as_wrong() {
        assert_eq!(accuracy([("unsure", SentimentLabel::Neutral)]), 0.0);
    }

    #[test]
    fn test_average_polarity() {
        assert_eq!(average_polarity(&[]), 0.0);
        assert_eq!(average_polarity(&[result(0.5), result(-0.25), result(0.1)]), 0.117);
    }

    #[test]
    fn test_top_aspects_split_and_count() {
        let cells = ["Cleanliness & Staff", "Staff", "Location &  Cleanliness", "Staff & "];
        let top = top_aspects(cells, 10);
        assert_eq!(
            top,
            vec![
                ("Staff".to_string(), 3),
                ("Cleanliness".to_string(), 2),
                ("Location".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_aspects_ties_keep_first_seen_order() {
        let cells = ["Food", "Wifi", "Pool", "Wifi", "Food"];
        let top = top_aspects(cells, 2);
        assert_eq!(top, vec![("Food".to_string(), 2), ("Wifi".to_string(), 2)]);
    }

    #[test]
    fn test_top_aspects_limit() {
        let cells: Vec<String> = (0..15).map(|i| format!("aspect{i}")).collect();
        let top = top_aspects(cells.iter().map(String::as_str), TOP_ASPECTS);
        assert_eq!(top.len(), TOP_ASPECTS);
        assert_eq!(top[0].0, "aspect0");
    }
}
