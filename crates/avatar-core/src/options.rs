//! Raw, caller-supplied request options.
//!
//! Several keys are accepted under more than one name (`size`, `s` and
//! `gravatar_size` for instance). Values stay loosely typed here; the
//! Gravatar source decides precedence and coercion when it resolves them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AvatarError, Result};

/// A loosely typed option value, as it might arrive from a form, a query
/// string or a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// Lenient integer coercion.
    ///
    /// Text is read as optional whitespace, an optional sign and leading
    /// decimal digits; anything unparseable is `0`. Floats truncate toward
    /// zero and booleans are `0`. Out-of-range values saturate at the `i64`
    /// bounds (`NaN` is `0`).
    pub fn to_int(&self) -> i64 {
        match self {
            Self::Integer(i) => *i,
            Self::Float(f) => f.trunc() as i64,
            Self::Bool(_) => 0,
            Self::Text(s) => parse_leading_int(s),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn parse_leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative { -value } else { value }
}

/// Options for a single avatar URL request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarOptions {
    /// Person field to hash; falls back to the source's default field
    #[serde(alias = "gravatar_field", skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Explicit default URL, taking precedence over the default source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_default_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_size: Option<OptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<OptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<OptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_rating: Option<OptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<OptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<OptionValue>,
}

impl AvatarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the person field to hash.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the explicit default URL, overriding any default source.
    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.gravatar_default_url = Some(url.into());
        self
    }

    /// Set the `default` key (a URL or a default avatar keyword).
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<OptionValue>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<OptionValue>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Set an option by key, as parsed from a `key=value` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let text = || Some(value.to_string());
        let loose = || Some(OptionValue::Text(value.to_string()));

        match key {
            "field" | "gravatar_field" => self.field = text(),
            "gravatar_default_url" => self.gravatar_default_url = text(),
            "d" => self.d = text(),
            "default" => self.default = text(),
            "gravatar_size" => self.gravatar_size = loose(),
            "size" => self.size = loose(),
            "s" => self.s = loose(),
            "gravatar_rating" => self.gravatar_rating = loose(),
            "rating" => self.rating = loose(),
            "r" => self.r = loose(),
            _ => {
                return Err(AvatarError::UnknownOption {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build options from `key=value` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                AvatarError::config(format!("Expected KEY=VALUE option, got '{pair}'"))
            })?;
            options.set(key.trim(), value.trim())?;
        }
        Ok(options)
    }

    /// Layer these options over `base`: keys set here win, unset keys are
    /// taken from `base`.
    pub fn merged_over(&self, base: &AvatarOptions) -> AvatarOptions {
        fn pick<T: Clone>(top: &Option<T>, bottom: &Option<T>) -> Option<T> {
            top.clone().or_else(|| bottom.clone())
        }

        AvatarOptions {
            field: pick(&self.field, &base.field),
            gravatar_default_url: pick(&self.gravatar_default_url, &base.gravatar_default_url),
            d: pick(&self.d, &base.d),
            default: pick(&self.default, &base.default),
            gravatar_size: pick(&self.gravatar_size, &base.gravatar_size),
            size: pick(&self.size, &base.size),
            s: pick(&self.s, &base.s),
            gravatar_rating: pick(&self.gravatar_rating, &base.gravatar_rating),
            rating: pick(&self.rating, &base.rating),
            r: pick(&self.r, &base.r),
        }
    }
}
