//! Token stream decoder.
//!
//! Layout of an IL stream:
//! - token 0: language (client type in bits 0-7)
//! - token 1: version and shader type
//! - then instructions, each an instruction token followed by its
//!   destination operands, source operands and extra tokens

use tracing::warn;

use crate::kernel::{Destination, Instruction, Kernel, Register, Source};
use crate::opcode::Opcode;
use crate::token::{bit, bits, Token, TokenCursor};
use crate::DisasmError;

/// Relative addressing mode meaning "no relative addressing".
const ADDR_ABSOLUTE: u32 = 0;

/// Decodes a whole token stream into a [`Kernel`].
///
/// # Errors
/// Returns [`DisasmError::MissingHeader`] if the stream is shorter than the
/// two header tokens and [`DisasmError::Truncated`] if an instruction runs
/// past the end of the stream.
pub fn decode(tokens: &[Token]) -> Result<Kernel, DisasmError> {
    let (&lang, &version) = match tokens {
        [lang, version, ..] => (lang, version),
        _ => return Err(DisasmError::MissingHeader { count: tokens.len() }),
    };

    let mut kernel = Kernel {
        client_type: low_byte(bits(lang, 0, 7)),
        minor_version: low_byte(bits(version, 0, 7)),
        major_version: low_byte(bits(version, 8, 15)),
        shader_type: low_byte(bits(version, 16, 23)),
        multipass: bit(version, 24),
        realtime: bit(version, 25),
        instructions: Vec::new(),
    };

    let mut cursor = TokenCursor::starting_at(tokens, 2);
    while !cursor.is_empty() {
        kernel.instructions.push(decode_instruction(&mut cursor)?);
    }

    tracing::debug!(
        instructions = kernel.instructions.len(),
        tokens = tokens.len(),
        "decoded IL stream"
    );
    Ok(kernel)
}

fn decode_instruction(cursor: &mut TokenCursor<'_>) -> Result<Instruction, DisasmError> {
    let offset = cursor.position();
    let token = cursor.read()?;
    let raw = low_half(bits(token, 0, 15));
    let control = low_half(bits(token, 16, 31));
    cursor.set_opcode(raw);

    let opcode = Opcode::from_raw(raw);
    let mut instr = Instruction {
        opcode,
        control,
        dsts: Vec::new(),
        srcs: Vec::new(),
        extras: Vec::new(),
    };

    let Some(layout) = opcode.layout() else {
        warn!(opcode = raw, offset, "unhandled opcode");
        return Ok(instr);
    };

    for _ in 0..layout.dst_count {
        instr.dsts.push(decode_destination(cursor)?);
    }
    for _ in 0..layout.src_count {
        instr.srcs.push(decode_source(cursor)?);
    }

    if layout.indexed_resource_sampler {
        let control = u32::from(control);
        if bit(control, 12) {
            warn!(opcode = raw, "unhandled indexed args");
        }
        if bit(control, 13) {
            warn!(opcode = raw, "unhandled immediate address offset");
        }
    }

    instr.extras = cursor.take(layout.extra_count)?;
    Ok(instr)
}

/// Decodes the register token shared by destinations and sources.
///
/// Returns the register and whether a modifier token follows.
fn decode_register(token: Token) -> (Register, bool) {
    let register = Register {
        num: low_half(bits(token, 0, 15)),
        kind: low_byte(bits(token, 16, 21)),
        relative_address: low_byte(bits(token, 23, 24)),
        dimension: bit(token, 25),
        extended: bit(token, 31),
        immediate: None,
    };
    (register, bit(token, 22))
}

/// Reads the optional immediate token and reports addressing modes the
/// listing does not represent.
fn finish_register(
    cursor: &mut TokenCursor<'_>,
    register: &mut Register,
    immediate_present: bool,
) -> Result<(), DisasmError> {
    if u32::from(register.relative_address) != ADDR_ABSOLUTE {
        warn!(addressing = register.relative_address, "unhandled addressing");
    }
    if register.dimension {
        warn!("unhandled dimension");
    }
    if immediate_present {
        register.immediate = Some(cursor.read()?);
    }
    if register.extended {
        warn!("unhandled extended register addressing");
    }
    Ok(())
}

fn decode_destination(cursor: &mut TokenCursor<'_>) -> Result<Destination, DisasmError> {
    let token = cursor.read()?;
    let (mut register, modifier_present) = decode_register(token);

    let mut dst = Destination::plain(register);
    if modifier_present {
        let m = cursor.read()?;
        dst.component = [
            low_byte(bits(m, 0, 1)),
            low_byte(bits(m, 2, 3)),
            low_byte(bits(m, 4, 5)),
            low_byte(bits(m, 6, 7)),
        ];
        dst.clamp = bit(m, 8);
        dst.shift_scale = low_byte(bits(m, 9, 12));
    }

    finish_register(cursor, &mut register, bit(token, 26))?;
    dst.register = register;
    Ok(dst)
}

fn decode_source(cursor: &mut TokenCursor<'_>) -> Result<Source, DisasmError> {
    let token = cursor.read()?;
    let (mut register, modifier_present) = decode_register(token);

    let mut src = Source::plain(register);
    if modifier_present {
        let m = cursor.read()?;
        src.swizzle = [
            low_byte(bits(m, 0, 2)),
            low_byte(bits(m, 4, 6)),
            low_byte(bits(m, 8, 10)),
            low_byte(bits(m, 12, 14)),
        ];
        src.negate = [bit(m, 3), bit(m, 7), bit(m, 11), bit(m, 15)];
        src.invert = bit(m, 16);
        src.bias = bit(m, 17);
        src.x2 = bit(m, 18);
        src.sign = bit(m, 19);
        src.abs = bit(m, 20);
        src.div_comp = low_byte(bits(m, 21, 23));
        src.clamp = bit(m, 24);
    }

    finish_register(cursor, &mut register, bit(token, 26))?;
    src.register = register;
    Ok(src)
}

#[allow(clippy::cast_possible_truncation)]
fn low_byte(value: u32) -> u8 {
    value as u8
}

#[allow(clippy::cast_possible_truncation)]
fn low_half(value: u32) -> u16 {
    value as u16
}
