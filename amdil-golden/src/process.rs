//! External-process disassembler backend.
//!
//! Runs `[launcher] <tool> <input> <output>` and waits for it to exit.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::backend::Disassembler;
use crate::GoldenError;

/// Disassembler backed by an external executable.
#[derive(Debug, Clone)]
pub struct ProcessDisassembler {
    /// Path to the disassembler executable.
    tool: PathBuf,

    /// Optional program the tool is run through (e.g. `wine`).
    launcher: Option<PathBuf>,

    /// Upper bound on a single run; `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl ProcessDisassembler {
    /// Create a backend that runs `tool` directly with no timeout.
    #[must_use]
    pub fn new(tool: PathBuf) -> Self {
        Self { tool, launcher: None, timeout: None }
    }

    /// Run the tool through `launcher`.
    #[must_use]
    pub fn with_launcher(mut self, launcher: PathBuf) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Kill the tool if it runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Program actually executed: the launcher if set, otherwise the tool.
    fn program(&self) -> &Path {
        self.launcher.as_deref().unwrap_or(&self.tool)
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(self.program());
        if self.launcher.is_some() {
            cmd.arg(&self.tool);
        }
        cmd.arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Disassembler for ProcessDisassembler {
    async fn disassemble(&self, input: &Path, output: &Path) -> Result<(), GoldenError> {
        let program = self.describe();
        tracing::debug!(%program, input = %input.display(), output = %output.display(), "running disassembler");

        let child = self
            .command(input, output)
            .spawn()
            .map_err(|source| GoldenError::LaunchFailed { program: program.clone(), source })?;

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| GoldenError::Timeout {
                    program: program.clone(),
                    secs: timeout.as_secs(),
                })?,
            None => child.wait_with_output().await,
        };
        let out = result?;

        if !out.stdout.is_empty() {
            tracing::debug!(%program, stdout = %String::from_utf8_lossy(&out.stdout).trim_end(), "disassembler stdout");
        }

        if !out.status.success() {
            return Err(GoldenError::ToolFailed {
                program,
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim_end().to_owned(),
            });
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), GoldenError> {
        match &self.launcher {
            Some(launcher) => {
                which_binary(launcher)?;
                // The launcher resolves the tool itself, so only its presence
                // on disk can be checked.
                if tokio::fs::metadata(&self.tool).await.is_err() {
                    return Err(GoldenError::ToolNotFound { path: self.tool.clone() });
                }
                Ok(())
            }
            None => which_binary(&self.tool),
        }
    }

    fn describe(&self) -> String {
        match &self.launcher {
            Some(launcher) => format!("{} {}", launcher.display(), self.tool.display()),
            None => self.tool.display().to_string(),
        }
    }
}

/// Verify a binary exists either at the given path or in `PATH`.
///
/// Paths with more than one component are taken as-is; bare names are
/// searched for in `PATH`.
fn which_binary(path: &Path) -> Result<(), GoldenError> {
    if path.is_absolute() || path.components().count() > 1 {
        if path.exists() {
            return Ok(());
        }
        return Err(GoldenError::ToolNotFound { path: path.to_owned() });
    }

    let found = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(path).exists()))
        .unwrap_or(false);

    if found {
        Ok(())
    } else {
        Err(GoldenError::ToolNotFound { path: path.to_owned() })
    }
}
