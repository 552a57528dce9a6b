// CSV loader for the labelled hotel review dataset.
//
// Expected header (extra columns are ignored):
//   Review ID, Cleaned Text (Lowercased), Sentiment, Primary Aspect

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "Review ID", default)]
    pub review_id: Option<i64>,
    #[serde(rename = "Cleaned Text (Lowercased)", default)]
    pub text: Option<String>,
    /// Human-assigned label: positive / negative / neutral / mixed
    #[serde(rename = "Sentiment", default)]
    pub sentiment: Option<String>,
    /// Aspect tags joined with '&', e.g. "Cleanliness & Staff"
    #[serde(rename = "Primary Aspect", default)]
    pub primary_aspect: Option<String>,
}

impl DatasetRow {
    /// True when the row has no review text worth classifying.
    pub fn is_blank(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
    }
}

/// Load the dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRow>> {
    if !path.exists() {
        anyhow::bail!("Dataset file not found: {}", path.display());
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;
    let rows = load_from_reader(file)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "Loaded review dataset");
    Ok(rows)
}

/// Parse dataset rows from any CSV source.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<DatasetRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row: DatasetRow = record.with_context(|| format!("Malformed row at line {}", i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}
