//! Text listing of a decoded [`Kernel`].
//!
//! The listing is the artifact compared against golden files, so its exact
//! bytes matter: every line ends with `\n`, no trailing whitespace.

use std::io::{self, Write};

use crate::kernel::{compsel, modcomp, Destination, Instruction, Kernel, Source};
use crate::names::{self, lookup};
use crate::opcode::Opcode;
use crate::token::{bit, bits};

/// Writes the listing of `kernel` to `out`.
///
/// # Errors
/// Propagates any error from the underlying writer.
pub fn dump_kernel<W: Write>(out: &mut W, kernel: &Kernel) -> io::Result<()> {
    writeln!(out, "{}", lookup(names::LANGUAGE_TYPES, kernel.client_type))?;
    writeln!(
        out,
        "il_{}_{}_{}{}{}",
        lookup(names::SHADER_TYPES, kernel.shader_type),
        kernel.major_version,
        kernel.minor_version,
        if kernel.multipass { "_mp" } else { "" },
        if kernel.realtime { "_rt" } else { "" },
    )?;

    for instr in &kernel.instructions {
        dump_instruction(out, instr)?;
    }
    Ok(())
}

fn dump_instruction<W: Write>(out: &mut W, instr: &Instruction) -> io::Result<()> {
    let control = u32::from(instr.control);

    match instr.opcode {
        Opcode::Add => write!(out, "add")?,
        Opcode::End => write!(out, "end")?,
        Opcode::Mad => write!(out, "mad")?,
        Opcode::Mov => write!(out, "mov")?,
        Opcode::Mul => write!(out, "mul")?,
        Opcode::RetDyn => write!(out, "ret_dyn")?,
        Opcode::DclLiteral => write!(out, "dcl_literal")?,
        Opcode::DclOutput => {
            write!(out, "dcl_output_{}", lookup(names::IMPORT_USAGES, control))?;
        }
        Opcode::DclInput => write!(
            out,
            "dcl_input_{}{}",
            lookup(names::IMPORT_USAGES, bits(control, 0, 4)),
            lookup(names::INTERP_MODES, bits(control, 5, 7)),
        )?,
        Opcode::DclResource => {
            let format = instr.extras.first().copied().unwrap_or_default();
            write!(
                out,
                "dcl_resource_id({})_type({}{})_fmtx({})_fmty({})_fmtz({})_fmtw({})",
                bits(control, 0, 7),
                lookup(names::PIXTEX_USAGES, bits(control, 8, 11)),
                if bit(control, 15) { ",unnorm" } else { "" },
                lookup(names::ELEMENT_FORMATS, bits(format, 20, 22)),
                lookup(names::ELEMENT_FORMATS, bits(format, 23, 25)),
                lookup(names::ELEMENT_FORMATS, bits(format, 26, 28)),
                lookup(names::ELEMENT_FORMATS, bits(format, 29, 31)),
            )?;
        }
        // Sampler ID is not printed.
        Opcode::Load => write!(out, "load_resource({})", bits(control, 0, 7))?,
        Opcode::DclGlobalFlags => write!(
            out,
            "dcl_global_flags {}{}{}{}0",
            if bit(control, 0) { "refactoringAllowed|" } else { "" },
            if bit(control, 1) { "forceEarlyDepthStencil|" } else { "" },
            if bit(control, 2) { "enableRawStructuredBuffers|" } else { "" },
            if bit(control, 3) { "enableDoublePrecisionFloatOps|" } else { "" },
        )?,
        Opcode::Unknown(value) => write!(out, "{value}?")?,
    }

    for dst in &instr.dsts {
        dump_destination(out, dst)?;
    }
    for src in &instr.srcs {
        dump_source(out, src)?;
    }

    if instr.opcode == Opcode::DclLiteral {
        for value in &instr.extras {
            write!(out, ", 0x{value:08X}")?;
        }
    }

    writeln!(out)
}

fn component_name(letter: &'static str, mode: u8) -> &'static str {
    if mode == modcomp::WRITE {
        letter
    } else {
        lookup(names::DST_COMPONENTS, mode)
    }
}

fn dump_immediate<W: Write>(out: &mut W, immediate: Option<u32>) -> io::Result<()> {
    match immediate {
        Some(value) => write!(out, "[{value}]"),
        None => Ok(()),
    }
}

fn dump_destination<W: Write>(out: &mut W, dst: &Destination) -> io::Result<()> {
    write!(
        out,
        "{}{} {}{}",
        lookup(names::SHIFT_SCALES, dst.shift_scale),
        if dst.clamp { "_sat" } else { "" },
        names::register_prefix(dst.register.kind),
        dst.register.num,
    )?;
    dump_immediate(out, dst.register.immediate)?;

    if !dst.writes_all() {
        write!(
            out,
            ".{}{}{}{}",
            component_name("x", dst.component[0]),
            component_name("y", dst.component[1]),
            component_name("z", dst.component[2]),
            component_name("w", dst.component[3]),
        )?;
    }
    Ok(())
}

fn dump_source<W: Write>(out: &mut W, src: &Source) -> io::Result<()> {
    write!(
        out,
        " {}{}",
        names::register_prefix(src.register.kind),
        src.register.num,
    )?;
    dump_immediate(out, src.register.immediate)?;

    let scale = match (src.bias, src.x2) {
        (true, false) => "_bias",
        (false, true) => "_x2",
        (true, true) => "_bx2",
        (false, false) => "",
    };
    write!(
        out,
        "{}{}{}{}{}",
        if src.invert { "_invert" } else { "" },
        scale,
        if src.sign { "_sign" } else { "" },
        lookup(names::DIV_COMPS, src.div_comp),
        if src.abs { "_abs" } else { "" },
    )?;

    if src.negate.iter().any(|&n| n) {
        write!(out, "_neg(")?;
        for (negated, letter) in src.negate.iter().zip(["x", "y", "z", "w"]) {
            if *negated {
                write!(out, "{letter}")?;
            }
        }
        write!(out, ")")?;
    }

    if src.clamp {
        write!(out, "_sat")?;
    }

    if src.swizzle != compsel::IDENTITY {
        write!(out, ".")?;
        for sel in src.swizzle {
            write!(out, "{}", lookup(names::COMPONENT_SELECTS, sel))?;
        }
    }
    Ok(())
}
