//! Raw 32-bit IL tokens and a bounds-checked cursor over them.

use crate::DisasmError;

/// One little-endian 32-bit word of an IL stream.
pub type Token = u32;

/// Size of a token in bytes.
pub const TOKEN_SIZE: usize = std::mem::size_of::<Token>();

/// Extracts bits `first..=last` of `token`.
#[must_use]
pub const fn bits(token: Token, first: u32, last: u32) -> u32 {
    debug_assert!(first <= last && last < 32);
    (token >> first) & (u32::MAX >> (31 - (last - first)))
}

/// Tests a single bit of `token`.
#[must_use]
pub const fn bit(token: Token, index: u32) -> bool {
    bits(token, index, index) != 0
}

/// Splits a byte buffer into little-endian tokens.
///
/// Returns the tokens and the number of trailing bytes that did not fill a
/// whole token.
#[must_use]
pub fn tokens_from_bytes(bytes: &[u8]) -> (Vec<Token>, usize) {
    let chunks = bytes.chunks_exact(TOKEN_SIZE);
    let trailing = chunks.remainder().len();
    let tokens = chunks
        .map(|c| Token::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    (tokens, trailing)
}

/// Forward-only cursor over a token slice.
#[derive(Debug)]
pub(crate) struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Opcode of the instruction being decoded, for error reports.
    opcode: u16,
}

impl<'a> TokenCursor<'a> {
    /// A cursor whose offsets count from the start of `tokens` but whose
    /// first read is at `pos`.
    pub(crate) fn starting_at(tokens: &'a [Token], pos: usize) -> Self {
        Self { tokens, pos, opcode: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn set_opcode(&mut self, opcode: u16) {
        self.opcode = opcode;
    }

    pub(crate) fn read(&mut self) -> Result<Token, DisasmError> {
        let token = self.tokens.get(self.pos).copied().ok_or(DisasmError::Truncated {
            offset: self.pos,
            opcode: self.opcode,
        })?;
        self.pos += 1;
        Ok(token)
    }

    pub(crate) fn take(&mut self, count: usize) -> Result<Vec<Token>, DisasmError> {
        let end = self.pos + count;
        let slice = self.tokens.get(self.pos..end).ok_or(DisasmError::Truncated {
            offset: self.tokens.len(),
            opcode: self.opcode,
        })?;
        self.pos = end;
        Ok(slice.to_vec())
    }
}
