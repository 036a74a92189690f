//! Comparison configuration.

use std::path::{Path, PathBuf};

use amdil_core::{FixtureName, FixturePaths};
use serde::{Deserialize, Serialize};

/// Where fixtures live and where scratch listings are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GoldenConfig {
    /// Directory holding `il_<name>.bin` and `il_<name>.txt`.
    pub resource_dir: PathBuf,

    /// Directory receiving `il_<name>_out.txt`.
    pub work_dir: PathBuf,
}

impl GoldenConfig {
    /// Create a config with scratch files in the current directory.
    #[must_use]
    pub fn new(resource_dir: PathBuf) -> Self {
        Self { resource_dir, work_dir: PathBuf::from(".") }
    }

    #[must_use]
    pub fn with_work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// The fixture directory shipped with this crate.
    #[must_use]
    pub fn bundled_resource_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("res")
    }

    #[must_use]
    pub fn paths(&self, name: &FixtureName) -> FixturePaths {
        FixturePaths::resolve(&self.resource_dir, &self.work_dir, name)
    }
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self::new(Self::bundled_resource_dir())
    }
}
