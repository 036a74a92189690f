//! Decoded form of an IL shader.

use crate::opcode::Opcode;
use crate::token::Token;

/// Register types with a dedicated prefix in listings.
pub mod regtype {
    pub const LITERAL: u8 = 3;
    pub const TEMP: u8 = 4;
    pub const INPUT: u8 = 33;
    pub const OUTPUT: u8 = 34;
}

/// Destination component write modes.
pub mod modcomp {
    pub const NOWRITE: u8 = 0;
    pub const WRITE: u8 = 1;
    pub const ZERO: u8 = 2;
    pub const ONE: u8 = 3;
}

/// Source component selectors.
pub mod compsel {
    pub const X_R: u8 = 0;
    pub const Y_G: u8 = 1;
    pub const Z_B: u8 = 2;
    pub const W_A: u8 = 3;
    pub const ZERO: u8 = 4;
    pub const ONE: u8 = 5;

    pub const IDENTITY: [u8; 4] = [X_R, Y_G, Z_B, W_A];
}

/// A whole shader: header fields plus its instructions in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    pub client_type: u8,
    pub major_version: u8,
    pub minor_version: u8,
    pub shader_type: u8,
    pub multipass: bool,
    pub realtime: bool,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub control: u16,
    pub dsts: Vec<Destination>,
    pub srcs: Vec<Source>,
    /// Opcode-specific trailing tokens (literal values, resource formats).
    pub extras: Vec<Token>,
}

/// Fields shared by the leading token of destination and source operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Register {
    pub num: u16,
    pub kind: u8,
    pub relative_address: u8,
    pub dimension: bool,
    pub extended: bool,
    pub immediate: Option<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub register: Register,
    /// Per-component write mode, see [`modcomp`].
    pub component: [u8; 4],
    pub clamp: bool,
    pub shift_scale: u8,
}

impl Destination {
    /// A destination without a modifier token.
    #[must_use]
    pub fn plain(register: Register) -> Self {
        Self {
            register,
            component: [modcomp::WRITE; 4],
            clamp: false,
            shift_scale: 0,
        }
    }

    #[must_use]
    pub fn writes_all(&self) -> bool {
        self.component == [modcomp::WRITE; 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub register: Register,
    /// Component selectors, see [`compsel`].
    pub swizzle: [u8; 4],
    pub negate: [bool; 4],
    pub invert: bool,
    pub bias: bool,
    pub x2: bool,
    pub sign: bool,
    pub abs: bool,
    pub div_comp: u8,
    pub clamp: bool,
}

impl Source {
    /// A source without a modifier token.
    #[must_use]
    pub fn plain(register: Register) -> Self {
        Self {
            register,
            swizzle: compsel::IDENTITY,
            negate: [false; 4],
            invert: false,
            bias: false,
            x2: false,
            sign: false,
            abs: false,
            div_comp: 0,
            clamp: false,
        }
    }
}
