//! Avatar sources.
//!
//! A source turns a person and a set of request options into an avatar
//! URL, or `None` when it has nothing to offer. This module provides:
//! - The [`AvatarSource`] capability
//! - Static URL and null sources
//! - [`DefaultSource`], the normalized fallback a Gravatar source consults

mod default;

use std::fmt::Debug;

use crate::error::Result;
use crate::options::AvatarOptions;
use crate::person::Person;

pub use default::DefaultSource;

/// Something that can produce an avatar URL for a person.
pub trait AvatarSource: Send + Sync + Debug {
    /// Return a URL for `person`, or `None` when this source has none.
    fn avatar_url_for(
        &self,
        person: Option<&dyn Person>,
        options: &AvatarOptions,
    ) -> Result<Option<String>>;
}

/// Returns the same URL for every person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUrlSource {
    url: String,
}

impl StaticUrlSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AvatarSource for StaticUrlSource {
    fn avatar_url_for(
        &self,
        _person: Option<&dyn Person>,
        _options: &AvatarOptions,
    ) -> Result<Option<String>> {
        Ok(Some(self.url.clone()))
    }
}

/// Never produces a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSource;

impl AvatarSource for NullSource {
    fn avatar_url_for(
        &self,
        _person: Option<&dyn Person>,
        _options: &AvatarOptions,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}
