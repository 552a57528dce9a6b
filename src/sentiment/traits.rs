// Polarity scorer trait.
//
// The classifier never names a concrete scorer. The default implementation
// is the built-in opinion lexicon, but anything that maps text to a
// (polarity, subjectivity) pair fits here: a different lexicon, a
// statistical model, a remote service.

use anyhow::Result;

/// Raw scores for a single piece of (already normalized) text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScore {
    /// Sentiment direction and strength, -1.0 (unfavorable) to 1.0 (favorable)
    pub polarity: f64,
    /// How opinion-laden the text is, 0.0 (factual) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl PolarityScore {
    /// Build a score, clamping both values into their documented ranges.
    pub fn clamped(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Trait for scoring text polarity. Scoring is synchronous; every
/// implementation so far is an in-memory lookup.
pub trait PolarityScorer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Score a single text. Empty input must yield a zero score, not an error.
    fn score(&self, text: &str) -> Result<PolarityScore>;
}

/// Scorer that always fails. Handy for exercising error propagation.
pub struct UnavailableScorer;

impl PolarityScorer for UnavailableScorer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn score(&self, _text: &str) -> Result<PolarityScore> {
        anyhow::bail!("polarity scorer is unavailable")
    }
}
