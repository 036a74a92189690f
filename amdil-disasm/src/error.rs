//! Error types for the disassembler crate.

use std::path::PathBuf;

/// Errors that can occur while decoding or dumping an IL stream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DisasmError {
    /// The stream is too short to hold the language and version tokens.
    #[error("IL stream has {count} token(s), the header needs 2")]
    MissingHeader { count: usize },

    /// The stream ended while an instruction still expected operands.
    #[error("IL stream truncated at token {offset} while decoding opcode {opcode}")]
    Truncated { offset: usize, opcode: u16 },

    /// An input or output file could not be accessed.
    #[error("cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the listing failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
