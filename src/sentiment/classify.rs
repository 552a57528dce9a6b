// Polarity classification — normalize, score, label by sign.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::traits::PolarityScorer;

/// Three-way sentiment label derived from the sign of the polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Positive above zero, negative below, neutral at exactly zero.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Parse a stored or user-supplied label. Anything unrecognized,
    /// including an empty string, lands in the neutral bucket.
    pub fn parse_or_neutral(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifier output before the caller attaches the review text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: SentimentLabel,
    /// Rounded to 3 decimals
    pub polarity: f64,
    /// Rounded to 3 decimals
    pub subjectivity: f64,
}

impl Classification {
    /// Attach the original (unnormalized) review text.
    pub fn with_review(self, review: impl Into<String>) -> SentimentResult {
        SentimentResult {
            sentiment: self.sentiment,
            polarity: self.polarity,
            subjectivity: self.subjectivity,
            review: review.into(),
        }
    }
}

/// A classified review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    /// The review exactly as submitted
    pub review: String,
}

/// Round to 3 decimal places. Negative zero comes back as plain zero.
pub fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Classify a single review.
///
/// The label is taken from the rounded polarity, so the emitted label and
/// the emitted polarity always agree. Scorer failures propagate unchanged.
pub fn classify(scorer: &dyn PolarityScorer, text: &str) -> Result<Classification> {
    let prepared = normalize(text);
    let score = scorer.score(&prepared)?;

    let polarity = round3(score.polarity);
    let subjectivity = round3(score.subjectivity);

    Ok(Classification {
        sentiment: SentimentLabel::from_polarity(polarity),
        polarity,
        subjectivity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::traits::PolarityScore;

    /// Returns a fixed score regardless of input.
    struct FixedScorer(f64, f64);

    impl PolarityScorer for FixedScorer {
        fn name(&self) -> &str {
            "fixed"
        }
        fn score(&self, _text: &str) -> Result<PolarityScore> {
            Ok(PolarityScore::clamped(self.0, self.1))
        }
    }

    #[test]
    fn test_label_from_sign() {
        assert_eq!(SentimentLabel::from_polarity(0.001), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.001), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_parse_or_neutral() {
        assert_eq!(SentimentLabel::parse_or_neutral("Positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::parse_or_neutral(" negative "), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::parse_or_neutral("neutral"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::parse_or_neutral("mixed"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::parse_or_neutral(""), SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(-0.6666), -0.667);
        assert_eq!(round3(1.0), 1.0);
        assert!(round3(-0.0001).is_sign_positive());
    }

    #[test]
    fn test_tiny_polarity_rounds_to_neutral() {
        let c = classify(&FixedScorer(0.0004, 0.2), "whatever").unwrap();
        assert_eq!(c.polarity, 0.0);
        assert_eq!(c.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn test_scores_are_rounded() {
        let c = classify(&FixedScorer(-0.33333, 0.55555), "x").unwrap();
        assert_eq!(c.polarity, -0.333);
        assert_eq!(c.subjectivity, 0.556);
        assert_eq!(c.sentiment, SentimentLabel::Negative);
    }

    #[test]
    fn test_with_review_keeps_original_text() {
        let c = classify(&FixedScorer(0.5, 0.5), "Great STAY!").unwrap();
        let r = c.with_review("Great STAY!");
        assert_eq!(r.review, "Great STAY!");
        assert_eq!(r.sentiment, SentimentLabel::Positive);
    }
}
