//! AMD IL disassembler CLI.
//!
//! Usage:
//!     amdil-dis <il.bin> [il.txt]
//!
//! Without an output path the listing goes to stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "amdil-dis")]
#[command(version)]
#[command(about = "Disassemble an AMD IL binary into a text listing")]
struct Args {
    /// IL binary to disassemble
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Listing destination (defaults to stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    amdil_core::logging::init();
    let args = Args::parse();

    let result = match &args.output {
        Some(output) => amdil_disasm::disassemble_file(&args.input, output).map(|_| ()),
        None => to_stdout(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(input = %args.input.display(), error = %e, "disassembly failed");
            ExitCode::FAILURE
        }
    }
}

fn to_stdout(args: &Args) -> Result<(), amdil_disasm::DisasmError> {
    let code = std::fs::read(&args.input).map_err(|source| amdil_disasm::DisasmError::File {
        path: args.input.clone(),
        source,
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    amdil_disasm::disassemble(&mut out, &code)?;
    out.flush()?;
    Ok(())
}
