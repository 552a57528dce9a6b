// Lexicon-based polarity scorer.
//
// Pattern-style scoring: each opinion word carries a (polarity, subjectivity)
// pair. An intensifier directly before an opinion word scales it, and a
// negation before that flips and dampens its polarity. The text score is
// the mean over every opinion word found. Text with no opinion words
// scores (0, 0), which the classifier reports as neutral.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::{PolarityScore, PolarityScorer};

/// Factor applied to an opinion word's polarity when it is negated.
pub const NEGATION_FACTOR: f64 = -0.5;

/// A single lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Built-in opinion words: (word, polarity, subjectivity).
///
/// Weighted toward hospitality vocabulary. Words that are neutral in
/// practice ("ok", "fine" as filler) are deliberately absent.
const OPINION_WORDS: &[(&str, f64, f64)] = &[
    // favorable
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("brilliant", 0.9, 1.0),
    ("charming", 0.5, 0.75),
    ("clean", 0.37, 0.69),
    ("comfortable", 0.4, 0.7),
    ("comfy", 0.5, 0.8),
    ("convenient", 0.3, 0.5),
    ("cozy", 0.5, 0.8),
    ("cosy", 0.5, 0.8),
    ("courteous", 0.6, 0.8),
    ("delicious", 1.0, 1.0),
    ("delightful", 0.8, 0.9),
    ("enjoyed", 0.5, 0.6),
    ("excellent", 1.0, 1.0),
    ("exceptional", 0.67, 1.0),
    ("fabulous", 0.4, 0.9),
    ("fantastic", 0.4, 0.9),
    ("fresh", 0.3, 0.5),
    ("friendly", 0.38, 0.5),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.7, 1.0),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.5),
    ("hospitable", 0.5, 0.6),
    ("impeccable", 0.9, 1.0),
    ("impressive", 1.0, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("luxurious", 0.6, 0.9),
    ("nice", 0.6, 1.0),
    ("peaceful", 0.5, 0.6),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("polite", 0.5, 0.7),
    ("quiet", 0.2, 0.4),
    ("recommend", 0.5, 0.5),
    ("recommended", 0.5, 0.5),
    ("relaxing", 0.5, 0.7),
    ("remarkable", 0.75, 0.75),
    ("satisfied", 0.5, 1.0),
    ("spacious", 0.4, 0.6),
    ("spotless", 0.8, 0.9),
    ("stunning", 0.5, 1.0),
    ("superb", 1.0, 1.0),
    ("terrific", 1.0, 1.0),
    ("tidy", 0.4, 0.6),
    ("warm", 0.6, 0.6),
    ("welcoming", 0.6, 0.7),
    ("wonderful", 1.0, 1.0),
    // unfavorable
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("cold", -0.6, 1.0),
    ("cramped", -0.5, 0.7),
    ("damp", -0.4, 0.6),
    ("dirty", -0.6, 0.8),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("dreadful", -1.0, 1.0),
    ("dusty", -0.4, 0.6),
    ("expensive", -0.5, 0.7),
    ("filthy", -0.9, 1.0),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("impolite", -0.6, 0.8),
    ("mediocre", -0.3, 0.6),
    ("mouldy", -0.6, 0.8),
    ("moldy", -0.6, 0.8),
    ("nasty", -1.0, 1.0),
    ("noisy", -0.1, 0.3),
    ("overpriced", -0.5, 0.8),
    ("poor", -0.4, 0.6),
    ("rude", -0.3, 0.6),
    ("sad", -0.5, 1.0),
    ("shabby", -0.6, 0.8),
    ("slow", -0.3, 0.4),
    ("small", -0.25, 0.4),
    ("smelly", -0.7, 0.9),
    ("stained", -0.5, 0.6),
    ("terrible", -1.0, 1.0),
    ("tiny", -0.2, 0.6),
    ("uncomfortable", -0.5, 0.7),
    ("unfriendly", -0.5, 0.7),
    ("unhelpful", -0.5, 0.6),
    ("unpleasant", -0.6, 0.9),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
];

/// Words that scale the opinion word directly after them.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("really", 1.3),
    ("very", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("truly", 1.3),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("barely", 0.5),
];

/// Words that negate the opinion word after them (optionally with one
/// intensifier in between). Contractions appear without their apostrophe
/// because normalization strips it.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "dont", "didnt", "doesnt", "isnt", "wasnt", "werent", "arent",
    "cant", "cannot", "couldnt", "wont", "wouldnt", "hardly",
];

/// Lexicon-backed implementation of [`PolarityScorer`].
pub struct LexiconScorer {
    name: String,
    opinions: HashMap<String, LexiconEntry>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconScorer {
    /// The built-in English hospitality lexicon.
    pub fn builtin() -> Self {
        let opinions = OPINION_WORDS
            .iter()
            .map(|&(word, polarity, subjectivity)| {
                (
                    word.to_string(),
                    LexiconEntry {
                        polarity,
                        subjectivity,
                    },
                )
            })
            .collect();
        Self::with_opinions("builtin-lexicon", opinions)
    }

    /// Use a custom set of opinion words with the default intensifiers and
    /// negations.
    pub fn with_opinions(name: &str, opinions: HashMap<String, LexiconEntry>) -> Self {
        Self {
            name: name.to_string(),
            opinions,
            intensifiers: INTENSIFIERS
                .iter()
                .map(|&(w, f)| (w.to_string(), f))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Load opinion words from a JSON file of the form
    /// `{ "word": { "polarity": 0.5, "subjectivity": 0.6 }, ... }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let scorer = Self::from_json_str(&raw)
            .with_context(|| format!("Invalid lexicon file {}", path.display()))?;
        info!(
            path = %path.display(),
            words = scorer.opinions.len(),
            "Loaded custom lexicon"
        );
        Ok(scorer)
    }

    /// Parse and validate a JSON lexicon. Keys are lower-cased so they match
    /// normalized text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, LexiconEntry> = serde_json::from_str(raw)?;
        let mut opinions = HashMap::with_capacity(parsed.len());
        for (word, entry) in parsed {
            if !(-1.0..=1.0).contains(&entry.polarity) {
                anyhow::bail!("polarity for '{word}' must be within [-1, 1], got {}", entry.polarity);
            }
            if !(0.0..=1.0).contains(&entry.subjectivity) {
                anyhow::bail!(
                    "subjectivity for '{word}' must be within [0, 1], got {}",
                    entry.subjectivity
                );
            }
            opinions.insert(word.to_lowercase(), entry);
        }
        Ok(Self::with_opinions("custom-lexicon", opinions))
    }

    /// Number of opinion words known to this scorer.
    pub fn len(&self) -> usize {
        self.opinions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opinions.is_empty()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, text: &str) -> Result<PolarityScore> {
        let words: Vec<&str> = text.split_whitespace().collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut assessed = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(entry) = self.opinions.get(*word) else {
                continue;
            };

            let mut polarity = entry.polarity;
            let mut subjectivity = entry.subjectivity;

            // Look back: [negation] [intensifier] opinion
            let mut back = i;
            if back > 0 {
                if let Some(factor) = self.intensifiers.get(words[back - 1]) {
                    polarity *= factor;
                    subjectivity *= factor;
                    back -= 1;
                }
            }
            if back > 0 && self.is_negation(words[back - 1]) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            assessed += 1;
        }

        if assessed == 0 {
            return Ok(PolarityScore::default());
        }

        let n = assessed as f64;
        let score = PolarityScore::clamped(polarity_sum / n, subjectivity_sum / n);
        debug!(
            scorer = %self.name,
            assessed,
            polarity = score.polarity,
            subjectivity = score.subjectivity,
            "Scored text"
        );
        Ok(score)
    }
}
