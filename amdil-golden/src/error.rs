//! Error types for the golden-file crate.

use std::path::PathBuf;

/// Errors that stop a fixture comparison before a verdict is reached.
///
/// A digest mismatch is not an error; it is reported through
/// [`crate::Outcome::Mismatch`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GoldenError {
    /// The disassembler (or its launcher) was not found.
    #[error("disassembler not found at {path}")]
    ToolNotFound { path: PathBuf },

    /// The disassembler process could not be started.
    #[error("failed to launch {program}: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The disassembler ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The disassembler did not finish within the configured timeout.
    #[error("{program} did not finish within {secs}s")]
    Timeout { program: String, secs: u64 },

    /// A fixture, reference or scratch file could not be read.
    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-process disassembler rejected the fixture.
    #[error("disassembly failed: {0}")]
    Disasm(#[from] amdil_disasm::DisasmError),

    /// A core type failed validation.
    #[error(transparent)]
    Core(#[from] amdil_core::CoreError),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The JSON report could not be encoded.
    #[error("report encoding failed: {0}")]
    Report(#[from] serde_json::Error),

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
