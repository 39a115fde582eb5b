//! Normalized default sources.

use std::sync::Arc;

use crate::error::{AvatarError, Result};
use crate::options::AvatarOptions;
use crate::person::Person;

use super::{AvatarSource, NullSource, StaticUrlSource};

const EXPECTED_KINDS: &str = "expected a string, an avatar source, or nothing";

/// The fallback a Gravatar source asks for a default avatar URL.
///
/// Built once when the source is configured and never absent afterwards:
/// "no default" is the [`DefaultSource::Null`] variant.
#[derive(Debug, Clone)]
pub enum DefaultSource {
    /// Always answers with this URL (or keyword)
    Static(StaticUrlSource),
    /// Delegates to an arbitrary source
    Custom(Arc<dyn AvatarSource>),
    /// Never produces a default
    Null(NullSource),
}

impl DefaultSource {
    /// The null default.
    pub fn none() -> Self {
        Self::Null(NullSource)
    }

    /// A default that always returns `url`.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Static(StaticUrlSource::new(url))
    }

    /// Wrap any source as the default.
    pub fn custom<S: AvatarSource + 'static>(source: S) -> Self {
        Self::Custom(Arc::new(source))
    }

    /// Normalize a configuration value.
    ///
    /// Strings become static defaults and a missing value becomes the null
    /// default. Every other TOML value kind is rejected.
    pub fn from_value(value: Option<&toml::Value>) -> Result<Self> {
        match value {
            None => Ok(Self::none()),
            Some(toml::Value::String(url)) => Ok(Self::url(url.as_str())),
            Some(other) => Err(invalid_argument(other.to_string())),
        }
    }

    /// Normalize a JSON value; `null` is treated like a missing value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::none()),
            serde_json::Value::String(url) => Ok(Self::url(url.as_str())),
            other => Err(invalid_argument(other.to_string())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }
}

fn invalid_argument(value: String) -> AvatarError {
    AvatarError::InvalidArgument {
        value,
        expected: EXPECTED_KINDS,
    }
}

impl Default for DefaultSource {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&str> for DefaultSource {
    fn from(url: &str) -> Self {
        Self::url(url)
    }
}

impl From<String> for DefaultSource {
    fn from(url: String) -> Self {
        Self::url(url)
    }
}

impl From<Arc<dyn AvatarSource>> for DefaultSource {
    fn from(source: Arc<dyn AvatarSource>) -> Self {
        Self::Custom(source)
    }
}

impl<T: Into<DefaultSource>> From<Option<T>> for DefaultSource {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::none, Into::into)
    }
}

impl AvatarSource for DefaultSource {
    fn avatar_url_for(
        &self,
        person: Option<&dyn Person>,
        options: &AvatarOptions,
    ) -> Result<Option<String>> {
        match self {
            Self::Static(source) => source.avatar_url_for(person, options),
            Self::Custom(source) => source.avatar_url_for(person, options),
            Self::Null(source) => source.avatar_url_for(person, options),
        }
    }
}
