//! Comparison results and the run report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use amdil_core::{Digest, FixtureName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::GoldenError;

/// Verdict of one fixture comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Listing and reference digests are equal; the scratch file was removed.
    Match,
    /// Digests differ; the scratch file was kept for inspection.
    Mismatch,
}

/// A complete record of a single fixture comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ComparisonRecord {
    /// The fixture that was compared.
    pub name: FixtureName,
    pub outcome: Outcome,
    /// Digest of the listing produced by this run.
    pub got: Digest,
    /// Digest of the approved reference listing.
    pub expected: Digest,
    /// Scratch listing path; only present on disk after a mismatch.
    pub scratch: PathBuf,
    /// When the comparison began.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration including the disassembler run.
    pub duration: Duration,
}

impl ComparisonRecord {
    /// Create a record, deriving the outcome from the two digests.
    #[must_use]
    pub fn new(
        name: FixtureName,
        got: Digest,
        expected: Digest,
        scratch: PathBuf,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        let outcome = if got == expected { Outcome::Match } else { Outcome::Mismatch };
        Self { name, outcome, got, expected, scratch, started_at, duration }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.outcome == Outcome::Match
    }

    /// The diagnostic line printed for a mismatch.
    #[must_use]
    pub fn mismatch_line(&self) -> String {
        format!("got {}, expected {}", self.got, self.expected)
    }
}

/// A fixture that could not be compared at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ComparisonFailure {
    pub name: FixtureName,
    pub error: String,
}

/// Everything one `amdil-cmp` invocation produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ComparisonReport {
    pub records: Vec<ComparisonRecord>,
    pub failures: Vec<ComparisonFailure>,
}

impl ComparisonReport {
    pub fn push_record(&mut self, record: ComparisonRecord) {
        self.records.push(record);
    }

    pub fn push_failure(&mut self, name: FixtureName, error: &GoldenError) {
        self.failures.push(ComparisonFailure { name, error: error.to_string() });
    }

    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.records.iter().filter(|r| !r.is_match()).count()
    }

    /// `true` when every fixture was compared and matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.failures.is_empty() && self.mismatches() == 0
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`GoldenError::Report`] if encoding fails or
    /// [`GoldenError::Io`] if the file cannot be written.
    pub async fn write_json(&self, path: &Path) -> Result<(), GoldenError> {
        let mut json = serde_json::to_vec_pretty(self)?;
        json.push(b'\n');
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
