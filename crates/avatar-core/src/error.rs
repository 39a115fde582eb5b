//! Error types for avatar resolution.

use thiserror::Error;

/// Errors raised while building a source or resolving an avatar URL.
///
/// Absent people and blank field values are not errors; those paths
/// return `Ok(None)` so callers can fall back to their own placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    /// A default source was given a value of an unsupported kind
    #[error("Invalid default source {value}: {expected}")]
    InvalidArgument { value: String, expected: &'static str },

    /// The resolved default is neither an http(s) URL nor a known keyword
    #[error(
        "default must be a fully-qualified http(s) URL or a default avatar type, got '{value}'"
    )]
    InvalidDefaultValue { value: String },

    /// Neither the request nor the source names a field to hash
    #[error(
        "No field specified; either set a default field or pass a value for `field` (probably \"email\")"
    )]
    MissingField,

    /// A `key=value` option pair named a key no source understands
    #[error("Unknown avatar option '{key}'")]
    UnknownOption { key: String },

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AvatarError {
    /// Build an [`AvatarError::Config`] from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AvatarError>;
