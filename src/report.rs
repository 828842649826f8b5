//! Machine-readable run summary.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregator::{AggregateResult, SourceOutcome};
use crate::utils::write_atomic;

/// Summary written next to the blocklist after each run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub total_domains: usize,
    pub processed_lists: Vec<SourceOutcome>,
    pub output_file: String,
}

impl RunSummary {
    /// Build a summary from a run result, without re-parsing any list
    pub fn from_result(result: &AggregateResult, output_file: impl Into<String>) -> Self {
        Self {
            timestamp: result.generated_at,
            total_domains: result.total_domains(),
            processed_lists: result.outcomes.clone(),
            output_file: output_file.into(),
        }
    }

    /// Load a summary from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read summary: {:?}", path.as_ref()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse summary: {:?}", path.as_ref()))
    }

    /// Save as pretty JSON, atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        write_atomic(path.as_ref(), content.as_bytes())
    }
}
