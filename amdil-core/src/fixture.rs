//! Fixture naming and path resolution.
//!
//! A fixture `<name>` owns three files:
//! - `il_<name>.bin`: the IL token stream, in the resource directory
//! - `il_<name>.txt`: the approved listing, next to the input
//! - `il_<name>_out.txt`: the scratch listing, in the working directory

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Name of a fixture pair, embedded into the fixed file name templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct FixtureName(String);

impl FixtureName {
    /// Validates and wraps a fixture name.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFixtureName`] if the name is empty or
    /// would escape the directory it is joined onto.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let reject = |reason: &str| CoreError::InvalidFixtureName {
            name: name.clone(),
            reason: reason.to_owned(),
        };

        if name.is_empty() {
            return Err(reject("name is empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(reject("name contains a path separator"));
        }
        if name.contains("..") {
            return Err(reject("name contains '..'"));
        }
        if name.contains('\0') {
            return Err(reject("name contains NUL"));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixtureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FixtureName {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FixtureName> for String {
    fn from(name: FixtureName) -> Self {
        name.0
    }
}

/// The three files involved in comparing one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FixturePaths {
    /// IL binary fed to the disassembler.
    pub input: PathBuf,
    /// Approved listing.
    pub reference: PathBuf,
    /// Listing produced by this run.
    pub scratch: PathBuf,
}

impl FixturePaths {
    /// Resolves the fixture files for `name`.
    #[must_use]
    pub fn resolve(resource_dir: &Path, work_dir: &Path, name: &FixtureName) -> Self {
        Self {
            input: resource_dir.join(format!("il_{name}.bin")),
            reference: resource_dir.join(format!("il_{name}.txt")),
            scratch: work_dir.join(format!("il_{name}_out.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FixtureName {
        match FixtureName::new(s) {
            Ok(n) => n,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn resolve_follows_naming_convention() {
        let paths = FixturePaths::resolve(Path::new("/res"), Path::new("work"), &name("simple"));
        assert_eq!(paths.input, PathBuf::from("/res/il_simple.bin"));
        assert_eq!(paths.reference, PathBuf::from("/res/il_simple.txt"));
        assert_eq!(paths.scratch, PathBuf::from("work/il_simple_out.txt"));
    }

    #[test]
    fn fixture_name_rejects_empty() {
        assert!(matches!(
            FixtureName::new(""),
            Err(CoreError::InvalidFixtureName { .. })
        ));
    }

    #[test]
    fn fixture_name_rejects_traversal() {
        assert!(FixtureName::new("../etc").is_err());
        assert!(FixtureName::new("a/b").is_err());
        assert!(FixtureName::new("a\\b").is_err());
        assert!(FixtureName::new("a\0b").is_err());
    }

    #[test]
    fn fixture_name_accepts_plain_identifiers() {
        assert_eq!(name("vs_passthrough").as_str(), "vs_passthrough");
        assert_eq!(name("ps-2.0").to_string(), "ps-2.0");
    }

    #[test]
    fn fixture_name_deserialize_validates() {
        let ok: Result<FixtureName, _> = serde_json::from_str("\"simple\"");
        assert!(ok.is_ok());
        let bad: Result<FixtureName, _> = serde_json::from_str("\"../x\"");
        assert!(bad.is_err(), "deserialization must run validation");
    }
}
