// Request-scoped analysis flows: classify, persist, summarize.
//
// Both the CLI and the web handlers go through these functions, so the
// rules about what gets stored (and how much of it) live in one place.

pub mod analyze;
pub mod dataset;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::sentiment::lexicon::LexiconScorer;
use crate::sentiment::PolarityScorer;

/// Build the polarity scorer selected by configuration.
pub fn create_scorer(config: &Config) -> Result<Box<dyn PolarityScorer>> {
    match &config.lexicon_path {
        Some(path) => {
            info!(path = %path.display(), "Using custom lexicon scorer");
            Ok(Box::new(LexiconScorer::from_json_file(path)?))
        }
        None => {
            info!("Using built-in lexicon scorer");
            Ok(Box::new(LexiconScorer::builtin()))
        }
    }
}
