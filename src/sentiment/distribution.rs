// Label distribution across a batch of classified reviews.

use serde::{Deserialize, Serialize};

use super::classify::{SentimentLabel, SentimentResult};

/// Count of results per sentiment label. All three buckets are always
/// present, zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl Distribution {
    /// A distribution holding a single result.
    pub fn single(label: SentimentLabel) -> Self {
        let mut d = Self::default();
        d.increment(label);
        d
    }

    pub fn increment(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Share of the total for one label, as a percentage (0 when empty).
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(label) as f64 / total as f64 * 100.0
    }
}

/// Tally the labels of a batch of results.
pub fn distribution(results: &[SentimentResult]) -> Distribution {
    let mut d = Distribution::default();
    for result in results {
        d.increment(result.sentiment);
    }
    d
}

/// Tally raw label strings, e.g. rows loaded from storage. Missing or
/// unrecognized labels count as neutral.
pub fn distribution_from_labels<'a, I>(labels: I) -> Distribution
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut d = Distribution::default();
    for label in labels {
        d.increment(label.map_or(SentimentLabel::Neutral, SentimentLabel::parse_or_neutral));
    }
    d
}
