//! Avatar Core Library
//!
//! Builds avatar image URLs for person records. The Gravatar source hashes
//! a configurable person field and asks a pluggable default source for the
//! image Gravatar should fall back to.

pub mod config;
pub mod error;
pub mod gravatar;
pub mod options;
pub mod person;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{AvatarConfig, GravatarConfig};

    // Errors
    pub use crate::error::AvatarError;

    // Gravatar
    pub use crate::gravatar::{DefaultAvatar, GravatarSource, Rating, ResolvedOptions};

    // Options and people
    pub use crate::options::{AvatarOptions, OptionValue};
    pub use crate::person::{Person, PersonRecord};

    // Sources
    pub use crate::source::{AvatarSource, DefaultSource, NullSource, StaticUrlSource};
}
