//! Golden-file regression checks for AMD IL disassembly.
//!
//! Runs a disassembler on each named fixture, digests the produced listing
//! and the approved reference with SHA-256, and reports whether they match.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod config;
pub mod digest;
pub mod error;
pub mod in_process;
pub mod process;
pub mod record;
pub mod runner;

pub use backend::Disassembler;
pub use config::GoldenConfig;
pub use digest::{digest_bytes, digest_file};
pub use error::GoldenError;
pub use in_process::InProcessDisassembler;
pub use process::ProcessDisassembler;
pub use record::{ComparisonFailure, ComparisonRecord, ComparisonReport, Outcome};
pub use runner::GoldenRunner;
