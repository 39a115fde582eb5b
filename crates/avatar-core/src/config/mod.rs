//! Configuration for avatar sources.
//!
//! A single `avatar.toml` holds the Gravatar source's constructor
//! arguments and request options applied to every lookup:
//!
//! ```toml
//! [gravatar]
//! default_source = "https://example.com/default.png"
//! default_field = "email"
//!
//! [options]
//! size = 80
//! rating = "PG"
//! ```

pub mod parser;
pub mod paths;

use serde::{Deserialize, Serialize};

use crate::error::{AvatarError, Result};
use crate::gravatar::{DEFAULT_FIELD, GravatarSource};
use crate::options::AvatarOptions;
use crate::source::DefaultSource;

pub use parser::{parse_config, parse_config_str, to_toml};
pub use paths::{CONFIG_FILE_NAME, config_path};

/// Root configuration structure for avatar.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Gravatar source settings
    #[serde(default)]
    pub gravatar: GravatarConfig,

    /// Request options every lookup starts from
    #[serde(default)]
    pub options: AvatarOptions,
}

/// Constructor arguments for [`GravatarSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravatarConfig {
    /// Default avatar URL or keyword; kept raw so non-string values can be
    /// reported instead of failing deserialization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_source: Option<toml::Value>,

    /// Person field to hash
    #[serde(default = "default_field")]
    pub default_field: String,
}

fn default_field() -> String {
    DEFAULT_FIELD.to_string()
}

impl Default for GravatarConfig {
    fn default() -> Self {
        Self {
            default_source: None,
            default_field: default_field(),
        }
    }
}

impl AvatarConfig {
    /// Check settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<()> {
        if self.gravatar.default_field.trim().is_empty() {
            return Err(AvatarError::config("gravatar.default_field must not be empty"));
        }
        if let Some(field) = &self.options.field {
            if field.trim().is_empty() {
                return Err(AvatarError::config("options.field must not be empty"));
            }
        }
        Ok(())
    }

    /// Build the Gravatar source this configuration describes.
    pub fn build_source(&self) -> Result<GravatarSource> {
        self.validate()?;
        let default_source = DefaultSource::from_value(self.gravatar.default_source.as_ref())?;
        tracing::debug!(
            field = %self.gravatar.default_field,
            has_default = !default_source.is_null(),
            "building gravatar source from config"
        );
        Ok(GravatarSource::new(
            default_source,
            self.gravatar.default_field.clone(),
        ))
    }

    /// Layer request options over the configured ones.
    pub fn options_for(&self, request: &AvatarOptions) -> AvatarOptions {
        request.merged_over(&self.options)
    }
}
