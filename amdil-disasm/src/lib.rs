//! Decoder and text dumper for AMD IL shader token streams.
//!
//! An IL binary is a little-endian sequence of 32-bit tokens. [`decode`]
//! turns it into a [`Kernel`]; [`dump_kernel`] writes the textual listing
//! that golden files are compared against.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod dump;
pub mod error;
pub mod kernel;
mod names;
pub mod opcode;
pub mod token;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use decoder::decode;
pub use dump::dump_kernel;
pub use error::DisasmError;
pub use kernel::{Destination, Instruction, Kernel, Register, Source};
pub use opcode::Opcode;
pub use token::{tokens_from_bytes, Token};

/// Decodes an IL binary and writes its listing to `out`.
///
/// Bytes past the last whole token are ignored.
///
/// # Errors
/// Returns a decode error for malformed streams, or [`DisasmError::Io`] if
/// writing fails. Nothing is written when decoding fails.
pub fn disassemble<W: Write>(out: &mut W, code: &[u8]) -> Result<Kernel, DisasmError> {
    let (tokens, trailing) = tokens_from_bytes(code);
    if trailing != 0 {
        tracing::warn!(trailing, "ignoring bytes past the last whole token");
    }

    let kernel = decode(&tokens)?;
    dump_kernel(out, &kernel)?;
    Ok(kernel)
}

/// Reads `input` in full and writes its listing to `output`.
///
/// The output file is only created once the input decoded successfully.
///
/// # Errors
/// Returns [`DisasmError::File`] if either file cannot be accessed, plus
/// anything [`disassemble`] returns.
pub fn disassemble_file(input: &Path, output: &Path) -> Result<Kernel, DisasmError> {
    let code = std::fs::read(input).map_err(|source| DisasmError::File {
        path: input.to_owned(),
        source,
    })?;

    let (tokens, trailing) = tokens_from_bytes(&code);
    if trailing != 0 {
        tracing::warn!(trailing, path = %input.display(), "ignoring bytes past the last whole token");
    }
    let kernel = decode(&tokens)?;

    let file = File::create(output).map_err(|source| DisasmError::File {
        path: output.to_owned(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    dump_kernel(&mut writer, &kernel)?;
    writer.flush()?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        instructions = kernel.instructions.len(),
        "disassembled"
    );
    Ok(kernel)
}
