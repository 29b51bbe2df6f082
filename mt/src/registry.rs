//! Concurrency-safe template registry

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::key::TemplateKey;
use crate::template::Template;

/// Map of template keys to loaded templates
///
/// Populated once by a load and only read afterwards. Lookups take a shared
/// lock and never block each other.
#[derive(Debug, Default)]
pub struct Registry {
    templates: RwLock<HashMap<TemplateKey, Arc<Template>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get the template stored at `key`, if any
    pub fn get(&self, key: impl AsRef<str>) -> Option<Arc<Template>> {
        let key = key.as_ref();
        debug!(%key, "Registry::get: called");
        let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        templates.get(key).cloned()
    }

    /// Store `template` at `key`, replacing any previous entry
    pub(crate) fn set(&self, key: TemplateKey, template: Template) {
        debug!(%key, "Registry::set: called");
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        templates.insert(key, Arc::new(template));
    }

    pub fn len(&self) -> usize {
        self.templates.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of templates in `registry`, 0 when there is none
    pub fn count(registry: Option<&Registry>) -> usize {
        registry.map_or(0, Registry::len)
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key.as_ref())
    }

    /// Snapshot of the stored keys, sorted
    pub fn keys(&self) -> Vec<TemplateKey> {
        let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<TemplateKey> = templates.keys().cloned().collect();
        keys.sort();
        keys
    }
}
