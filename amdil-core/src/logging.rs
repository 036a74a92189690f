//! Subscriber setup shared by the command-line tools.
//!
//! Events always go to stderr: `amdil-dis` may write its listing to stdout
//! and `amdil-cmp` reserves stdout for the mismatch line. They can also be
//! mirrored to the file named in [`LOG_FILE_ENV`].

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::CoreError;

/// Environment variable selecting the log level for both tools.
pub const LOG_LEVEL_ENV: &str = "AMDIL_LOG_LEVEL";

/// Environment variable naming a file that receives a copy of every event.
pub const LOG_FILE_ENV: &str = "AMDIL_LOG_FILE";

/// Verbosity levels accepted in [`LOG_LEVEL_ENV`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum LogLevel {
    Trace,
    Verbose,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    None,
}

impl LogLevel {
    /// Maps to the closest `tracing` filter. `verbose` sits between trace
    /// and debug, so it keeps trace events.
    #[must_use]
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Trace | Self::Verbose => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::None => LevelFilter::OFF,
        }
    }
}

impl FromStr for LogLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Self::Trace),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "none" => Ok(Self::None),
            other => Err(CoreError::UnknownLogLevel(other.to_owned())),
        }
    }
}

/// Builds the filter: `RUST_LOG` wins, then [`LOG_LEVEL_ENV`], then `info`.
///
/// An unrecognised level falls back to `info`; the error is returned
/// alongside so the caller can report it once logging is up.
#[must_use]
pub fn filter_from_env() -> (EnvFilter, Option<CoreError>) {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return (filter, None);
    }

    let (level, err) = match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => match value.parse::<LogLevel>() {
            Ok(level) => (level, None),
            Err(e) => (LogLevel::default(), Some(e)),
        },
        Err(_) => (LogLevel::default(), None),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.to_filter().into())
        .parse_lossy("");
    (filter, err)
}

/// Picks the log file from the raw [`LOG_FILE_ENV`] value.
///
/// Unset or empty means no file, and so does the `none` level.
#[must_use]
pub fn log_file_path(value: Option<&str>, level: Option<LogLevel>) -> Option<PathBuf> {
    if level == Some(LogLevel::None) {
        return None;
    }
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

type FileLayer<S> = fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, Mutex<File>>;

fn file_layer<S>(file: File) -> FileLayer<S> {
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
}

/// Installs the global subscriber: stderr, plus the log file if one is set.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let (filter, err) = filter_from_env();

    let level = std::env::var(LOG_LEVEL_ENV).ok().and_then(|v| v.parse().ok());
    let path = log_file_path(std::env::var(LOG_FILE_ENV).ok().as_deref(), level);
    let (file, file_err) = match path.map(|p| File::create(&p).map_err(|e| (p, e))) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file.map(file_layer))
        .try_init()
        .is_ok();
    if !installed {
        return;
    }

    if let Some(e) = err {
        tracing::warn!(error = %e, "falling back to info");
    }
    if let Some((path, e)) = file_err {
        tracing::warn!(path = %path.display(), error = %e, "cannot open log file, logging to stderr only");
    }
}
