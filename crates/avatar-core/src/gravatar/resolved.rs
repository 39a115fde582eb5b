//! Validated per-request options and the value sets they are checked against.

use std::fmt;

use serde::Serialize;

/// Maximum content rating Gravatar may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rating {
    G,
    PG,
    R,
    X,
    #[serde(rename = "any")]
    Any,
}

impl Rating {
    pub const ALL: [Rating; 5] = [Rating::G, Rating::PG, Rating::R, Rating::X, Rating::Any];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::G => "G",
            Self::PG => "PG",
            Self::R => "R",
            Self::X => "X",
            Self::Any => "any",
        }
    }

    /// Exact, case-sensitive match against the allowed ratings.
    pub fn parse(rating: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == rating)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in images Gravatar can serve when a hash has no avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultAvatar {
    /// Respond with HTTP 404 instead of an image
    NotFound,
    MysteryMan,
    Identicon,
    MonsterId,
    Wavatar,
    Retro,
}

impl DefaultAvatar {
    pub const ALL: [DefaultAvatar; 6] = [
        DefaultAvatar::NotFound,
        DefaultAvatar::MysteryMan,
        DefaultAvatar::Identicon,
        DefaultAvatar::MonsterId,
        DefaultAvatar::Wavatar,
        DefaultAvatar::Retro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "404",
            Self::MysteryMan => "mm",
            Self::Identicon => "identicon",
            Self::MonsterId => "monsterid",
            Self::Wavatar => "wavatar",
            Self::Retro => "retro",
        }
    }

    pub fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == keyword)
    }
}

impl fmt::Display for DefaultAvatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options after precedence, coercion and validation.
///
/// Only present keys end up in the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub field: Option<String>,
    /// An http(s) URL or a [`DefaultAvatar`] keyword
    pub default: Option<String>,
    /// Always greater than zero
    pub size: Option<u64>,
    pub rating: Option<Rating>,
}

impl ResolvedOptions {
    /// Query parameters in URL order; `default` is always last.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(rating) = self.rating {
            pairs.push(("rating", rating.to_string()));
        }
        if let Some(default) = &self.default {
            pairs.push(("default", default.clone()));
        }
        pairs
    }
}
