//! Disassembler backend abstraction.
//!
//! Lets the comparison pipeline run against the external `amdil-dis` tool
//! (possibly through a compatibility launcher such as `wine`) or the
//! in-process decoder without changing the hash-and-compare logic.

use std::path::Path;

use async_trait::async_trait;

use crate::GoldenError;

/// Something that turns an IL binary into a listing file.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait Disassembler: Send + Sync {
    /// Disassemble `input`, writing the listing to `output`.
    ///
    /// Returns once the listing is complete.
    ///
    /// # Errors
    /// Returns [`GoldenError::LaunchFailed`] if an external tool cannot be
    /// started, [`GoldenError::ToolFailed`] if it exits unsuccessfully, and
    /// [`GoldenError::Timeout`] if it overruns a configured timeout.
    async fn disassemble(&self, input: &Path, output: &Path) -> Result<(), GoldenError>;

    /// Check that the backend is usable before running any fixture.
    ///
    /// # Errors
    /// Returns [`GoldenError::ToolNotFound`] if the tool or launcher is missing.
    async fn health_check(&self) -> Result<(), GoldenError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}
