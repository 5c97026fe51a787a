//! An explicit, caller-constructed replacement for the "process-wide mutable
//! registry" the distilled spec describes (SPEC_FULL.md §4.9, §9 "Global
//! registry"): a version tag and a meta-schema URI both resolve to a
//! [`Draft`], the same way registering a validator class against both keys
//! would have.
use std::collections::HashMap;

use crate::schemas::{Draft, DRAFT3_URI, DRAFT4_URI};

/// Maps version tags and meta-schema URIs to the [`Draft`] they select.
/// `Registry::default()` is pre-populated with draft-03 and draft-04, as a
/// process-wide registry would have been by the time either draft's
/// validator class was first imported.
pub struct Registry {
    by_version: HashMap<String, Draft>,
    by_meta_schema_uri: HashMap<String, Draft>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Registry {
            by_version: HashMap::new(),
            by_meta_schema_uri: HashMap::new(),
        };
        registry.register("draft3", DRAFT3_URI, Draft::Draft3);
        registry.register("draft4", DRAFT4_URI, Draft::Draft4);
        registry
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            by_version: HashMap::new(),
            by_meta_schema_uri: HashMap::new(),
        }
    }

    pub fn register(&mut self, version_tag: impl Into<String>, meta_schema_uri: impl Into<String>, draft: Draft) {
        self.by_version.insert(version_tag.into(), draft);
        self.by_meta_schema_uri.insert(meta_schema_uri.into(), draft);
    }

    pub fn by_version(&self, version_tag: &str) -> Option<Draft> {
        self.by_version.get(version_tag).copied()
    }

    pub fn by_meta_schema_uri(&self, uri: &str) -> Option<Draft> {
        let trimmed = uri.split('#').next().unwrap_or(uri);
        self.by_meta_schema_uri
            .iter()
            .find(|(registered, _)| registered.split('#').next().unwrap_or(registered) == trimmed)
            .map(|(_, draft)| *draft)
    }
}
