//! Person records that avatars are derived from.
//!
//! Sources never assume a schema: they ask a [`Person`] for a field by
//! name and treat a missing answer as "no avatar available".

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Named-field access on a person record.
pub trait Person {
    /// Return the string form of the named field, if the record has one.
    fn field(&self, name: &str) -> Option<String>;
}

/// A minimal person record with an email, a display name and a blog URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub blog_url: Option<String>,
}

impl PersonRecord {
    /// Create a record whose name defaults to the email.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            name: Some(email.clone()),
            email: Some(email),
            blog_url: None,
        }
    }

    /// A record with no email at all.
    pub fn anonymous() -> Self {
        Self {
            email: None,
            name: None,
            blog_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_blog_url(mut self, blog_url: impl Into<String>) -> Self {
        self.blog_url = Some(blog_url.into());
        self
    }
}

impl Person for PersonRecord {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "email" => self.email.clone(),
            "name" => self.name.clone(),
            "blog_url" => self.blog_url.clone(),
            _ => None,
        }
    }
}

impl Person for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Person for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// JSON objects expose their scalar members; `null`, arrays and nested
/// objects are treated as absent.
impl Person for serde_json::Value {
    fn field(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl<P: Person + ?Sized> Person for &P {
    fn field(&self, name: &str) -> Option<String> {
        (**self).field(name)
    }
}
