/// Errors produced by the `amdil-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A fixture name could not be used to build file names.
    #[error("invalid fixture name '{name}': {reason}")]
    InvalidFixtureName { name: String, reason: String },

    /// A digest string was not 64 hexadecimal characters.
    #[error("invalid digest '{value}': {reason}")]
    InvalidDigest { value: String, reason: String },

    /// The log level named in the environment is not recognised.
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}
