//! Golden-file runner: disassemble a fixture and compare it to its reference.
//!
//! For each fixture the runner:
//! 1. Resolves the input, reference and scratch paths
//! 2. Runs the disassembler backend on the input, writing the scratch file
//! 3. Digests the scratch listing and the reference listing in full
//! 4. Removes the scratch file on a match, keeps it on a mismatch

use std::io::ErrorKind;
use std::time::Instant;

use amdil_core::FixtureName;
use chrono::Utc;

use crate::digest::digest_file;
use crate::{ComparisonRecord, ComparisonReport, Disassembler, GoldenConfig, GoldenError};

/// Compares disassembler output against approved listings.
///
/// Runs one fixture at a time. Two runners sharing a work directory must
/// not compare the same fixture concurrently; they would share a scratch
/// file.
pub struct GoldenRunner<B: Disassembler> {
    backend: B,
    config: GoldenConfig,
}

impl<B: Disassembler> GoldenRunner<B> {
    #[must_use]
    pub fn new(backend: B, config: GoldenConfig) -> Self {
        Self { backend, config }
    }

    #[must_use]
    pub fn config(&self) -> &GoldenConfig {
        &self.config
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compare a single fixture.
    ///
    /// # Errors
    /// Returns [`GoldenError::FileRead`] if the input, scratch or reference
    /// file cannot be read, and propagates backend failures. A digest
    /// mismatch is not an error.
    pub async fn compare(&self, name: &FixtureName) -> Result<ComparisonRecord, GoldenError> {
        let paths = self.config.paths(name);
        let started_at = Utc::now();
        let wall_start = Instant::now();

        tokio::fs::metadata(&paths.input).await.map_err(|source| GoldenError::FileRead {
            path: paths.input.clone(),
            source,
        })?;

        // A stale listing from an earlier run must never be compared.
        match tokio::fs::remove_file(&paths.scratch).await {
            Ok(()) => tracing::debug!(scratch = %paths.scratch.display(), "removed stale scratch listing"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(GoldenError::Io(e)),
        }

        tracing::info!(
            fixture = %name,
            backend = %self.backend.describe(),
            "disassembling fixture"
        );
        self.backend.disassemble(&paths.input, &paths.scratch).await?;

        let got = digest_file(&paths.scratch).await?;
        let expected = digest_file(&paths.reference).await?;

        let record = ComparisonRecord::new(
            name.clone(),
            got,
            expected,
            paths.scratch.clone(),
            started_at,
            wall_start.elapsed(),
        );

        if record.is_match() {
            tokio::fs::remove_file(&paths.scratch).await?;
            tracing::info!(fixture = %name, digest = %got, elapsed_ms = record.duration.as_millis(), "listing matches reference");
        } else {
            tracing::warn!(
                fixture = %name,
                got = %got,
                expected = %expected,
                scratch = %paths.scratch.display(),
                "listing differs from reference"
            );
        }

        Ok(record)
    }

    /// Compare every fixture in order, collecting verdicts and failures.
    ///
    /// A failure on one fixture does not stop the others.
    pub async fn compare_all(&self, names: &[FixtureName]) -> ComparisonReport {
        let mut report = ComparisonReport::default();
        for name in names {
            match self.compare(name).await {
                Ok(record) => report.push_record(record),
                Err(e) => {
                    tracing::error!(fixture = %name, error = %e, "comparison aborted");
                    report.push_failure(name.clone(), &e);
                }
            }
        }
        report
    }
}
