//! Core types for the AMD IL disassembler and golden-file tooling.
//!
//! Defines content digests, fixture naming, and the logging setup the
//! command-line tools share.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod digest;
pub mod error;
pub mod fixture;
pub mod logging;

pub use digest::{Digest, DIGEST_LEN};
pub use error::CoreError;
pub use fixture::{FixtureName, FixturePaths};
pub use logging::LogLevel;
