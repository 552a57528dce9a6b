// Sentiment core — normalize, score, classify, tally.
//
// raw text → normalize → PolarityScorer → label by sign → distribution.
// The scorer sits behind a trait so the lexicon can be swapped without
// touching the rest of the pipeline.

pub mod batch;
pub mod classify;
pub mod distribution;
pub mod lexicon;
pub mod normalize;
pub mod traits;

pub use batch::classify_batch;
pub use classify::{classify, Classification, SentimentLabel, SentimentResult};
pub use distribution::{distribution, Distribution};
pub use normalize::normalize;
pub use traits::{PolarityScore, PolarityScorer};
