//! Golden-file comparator CLI.
//!
//! Usage:
//!     amdil-cmp <NAME>...
//!     amdil-cmp --tool test/amdil-dis.exe --launcher wine <NAME>...
//!
//! Exit status: 0 when every listing matches, 1 on any mismatch, 2 when a
//! fixture could not be compared at all.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use amdil_core::FixtureName;
use amdil_golden::{
    ComparisonReport, Disassembler, GoldenConfig, GoldenError, GoldenRunner, InProcessDisassembler,
    ProcessDisassembler,
};
use clap::Parser;

const EXIT_MISMATCH: u8 = 1;
const EXIT_INFRASTRUCTURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "amdil-cmp")]
#[command(version)]
#[command(about = "Compare AMD IL disassembly against approved listings")]
struct Args {
    /// Fixture names; `simple` means il_simple.bin / il_simple.txt
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,

    /// Directory holding the fixture binaries and reference listings
    #[arg(long, env = "AMDIL_RES_DIR")]
    res_dir: Option<PathBuf>,

    /// Directory receiving scratch listings
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// External disassembler; the built-in one is used when omitted
    #[arg(long, env = "AMDIL_DIS")]
    tool: Option<PathBuf>,

    /// Program to run the external disassembler through (e.g. wine)
    #[arg(long, env = "AMDIL_LAUNCHER")]
    launcher: Option<PathBuf>,

    /// Kill the external disassembler after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write a JSON report of every comparison to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    amdil_core::logging::init();
    let args = Args::parse();

    let names = match args
        .names
        .iter()
        .map(|n| FixtureName::new(n.as_str()))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(error = %e, "invalid fixture name");
            return ExitCode::from(EXIT_INFRASTRUCTURE);
        }
    };

    let config = GoldenConfig::new(args.res_dir.clone().unwrap_or_else(GoldenConfig::bundled_resource_dir))
        .with_work_dir(args.work_dir.clone());

    let result = match &args.tool {
        Some(tool) => {
            let mut backend = ProcessDisassembler::new(tool.clone());
            if let Some(launcher) = &args.launcher {
                backend = backend.with_launcher(launcher.clone());
            }
            if let Some(secs) = args.timeout_secs {
                backend = backend.with_timeout(Duration::from_secs(secs));
            }
            run(backend, config, &names).await
        }
        None => {
            if args.launcher.is_some() || args.timeout_secs.is_some() {
                tracing::warn!("--launcher and --timeout-secs only apply with --tool");
            }
            run(InProcessDisassembler, config, &names).await
        }
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "disassembler unavailable");
            return ExitCode::from(EXIT_INFRASTRUCTURE);
        }
    };

    for record in report.records.iter().filter(|r| !r.is_match()) {
        println!("{}", record.mismatch_line());
    }

    if let Some(path) = &args.report {
        if let Err(e) = report.write_json(path).await {
            tracing::error!(path = %path.display(), error = %e, "failed to write report");
            return ExitCode::from(EXIT_INFRASTRUCTURE);
        }
    }

    exit_code(&report)
}

async fn run<B: Disassembler>(
    backend: B,
    config: GoldenConfig,
    names: &[FixtureName],
) -> Result<ComparisonReport, GoldenError> {
    backend.health_check().await?;
    let runner = GoldenRunner::new(backend, config);
    Ok(runner.compare_all(names).await)
}

fn exit_code(report: &ComparisonReport) -> ExitCode {
    if !report.failures.is_empty() {
        ExitCode::from(EXIT_INFRASTRUCTURE)
    } else if report.mismatches() > 0 {
        ExitCode::from(EXIT_MISMATCH)
    } else {
        ExitCode::SUCCESS
    }
}
