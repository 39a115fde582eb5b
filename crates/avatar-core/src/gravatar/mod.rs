//! Gravatar avatar source.
//!
//! Gravatar serves an image (or a default) for every hash, so this source
//! always produces a URL when the person has a usable field value. Put it
//! last among fallbacks, or give it a [`DefaultSource`] to pick the image
//! Gravatar shows for unknown hashes.
//!
//! URL layout:
//! `http://www.gravatar.com/avatar/<md5>[?size=N][&rating=R][&default=D]`

mod builder;
mod resolved;

use crate::error::{AvatarError, Result};
use crate::options::{AvatarOptions, OptionValue};
use crate::person::Person;
use crate::source::{AvatarSource, DefaultSource};

pub use builder::{build_url, hash_value};
pub use resolved::{DefaultAvatar, Rating, ResolvedOptions};

/// Field hashed when neither the request nor the source names one.
pub const DEFAULT_FIELD: &str = "email";

/// Generates Gravatar URLs for people.
#[derive(Debug, Clone)]
pub struct GravatarSource {
    default_source: DefaultSource,
    default_field: Option<String>,
}

impl Default for GravatarSource {
    fn default() -> Self {
        Self::new(DefaultSource::none(), DEFAULT_FIELD)
    }
}

impl GravatarSource {
    pub const BASE_URL: &'static str = "http://www.gravatar.com/avatar/";

    pub const ALLOWED_RATINGS: [&'static str; 5] = ["G", "PG", "R", "X", "any"];

    pub const DEFAULT_KEYWORDS: [&'static str; 6] =
        ["404", "mm", "identicon", "monsterid", "wavatar", "retro"];

    /// Create a source.
    ///
    /// `default_source` accepts a URL string, any [`AvatarSource`] wrapped
    /// in a [`DefaultSource`], or `None` for no default.
    pub fn new(default_source: impl Into<DefaultSource>, default_field: impl Into<String>) -> Self {
        Self {
            default_source: default_source.into(),
            default_field: Some(default_field.into()),
        }
    }

    pub fn with_default_source(mut self, default_source: impl Into<DefaultSource>) -> Self {
        self.default_source = default_source.into();
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    pub fn default_source(&self) -> &DefaultSource {
        &self.default_source
    }

    pub fn set_default_source(&mut self, default_source: impl Into<DefaultSource>) {
        self.default_source = default_source.into();
    }

    pub fn default_field(&self) -> Option<&str> {
        self.default_field.as_deref()
    }

    /// Change the fallback field; `None` forces every request to name one.
    pub fn set_default_field(&mut self, field: Option<String>) {
        self.default_field = field;
    }

    /// Generate a Gravatar URL for `person`.
    ///
    /// Returns `Ok(None)` when there is no person or the field is missing
    /// or blank. Fails when the resolved default is invalid or no field can
    /// be determined.
    pub fn avatar_url_for(
        &self,
        person: Option<&dyn Person>,
        options: &AvatarOptions,
    ) -> Result<Option<String>> {
        let Some(person) = person else {
            return Ok(None);
        };

        let resolved = self.resolve_options(Some(person), options)?;
        let field = resolved
            .field
            .as_deref()
            .ok_or(AvatarError::MissingField)?;

        let Some(value) = person.field(field) else {
            tracing::debug!(field, "person has no value for avatar field");
            return Ok(None);
        };
        let Some(digest) = hash_value(&value) else {
            tracing::debug!(field, "avatar field is blank");
            return Ok(None);
        };

        Ok(Some(build_url(Self::BASE_URL, &digest, &resolved)))
    }

    /// Merge request options with this source's defaults and validate them.
    ///
    /// Precedence per key:
    /// - field: `field`, then the default field
    /// - default: `gravatar_default_url`, the default source, `d`, `default`
    /// - size: `gravatar_size`, `size`, `s` (kept only when positive)
    /// - rating: `gravatar_rating`, `rating`, `r` (kept only when allowed)
    pub fn resolve_options(
        &self,
        person: Option<&dyn Person>,
        options: &AvatarOptions,
    ) -> Result<ResolvedOptions> {
        let field = options
            .field
            .clone()
            .or_else(|| self.default_field.clone());

        let default = match options.gravatar_default_url.clone() {
            Some(url) => Some(url),
            None => self
                .default_source
                .avatar_url_for(person, options)?
                .or_else(|| options.d.clone())
                .or_else(|| options.default.clone()),
        };
        if let Some(value) = &default {
            if !is_valid_default_url(value) && !is_valid_default_keyword(value) {
                return Err(AvatarError::InvalidDefaultValue {
                    value: value.clone(),
                });
            }
        }

        let size = first_present([&options.gravatar_size, &options.size, &options.s])
            .and_then(|raw| {
                let size = raw.to_int();
                if size > 0 {
                    u64::try_from(size).ok()
                } else {
                    tracing::debug!(%raw, "ignoring non-positive avatar size");
                    None
                }
            });

        let rating = first_present([&options.gravatar_rating, &options.rating, &options.r])
            .and_then(|raw| {
                let rating = Rating::parse(&raw.to_string());
                if rating.is_none() {
                    tracing::debug!(%raw, "ignoring unknown avatar rating");
                }
                rating
            });

        Ok(ResolvedOptions {
            field,
            default,
            size,
            rating,
        })
    }
}

impl AvatarSource for GravatarSource {
    fn avatar_url_for(
        &self,
        person: Option<&dyn Person>,
        options: &AvatarOptions,
    ) -> Result<Option<String>> {
        GravatarSource::avatar_url_for(self, person, options)
    }
}

fn first_present<const N: usize>(
    candidates: [&Option<OptionValue>; N],
) -> Option<&OptionValue> {
    candidates.into_iter().find_map(Option::as_ref)
}

/// Whether `value` is a fully-qualified `http` or `https` URL.
pub fn is_valid_default_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Whether `value` names one of Gravatar's built-in default images.
pub fn is_valid_default_keyword(value: &str) -> bool {
    DefaultAvatar::parse(value).is_some()
}

#[cfg(test)]
mod tests;
