//! Template keys

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a template unit in a [`Registry`](crate::Registry)
///
/// The key of a loaded template is the base name of the directory it was
/// loaded from, e.g. `templates/resetPassword` is stored at `resetPassword`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateKey(String);

impl TemplateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TemplateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TemplateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for TemplateKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
