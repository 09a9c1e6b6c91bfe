// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog: the mapping from configuration section name to the
//! factory that builds a plugin from that section's payload.
//!
//! The catalog is populated once at startup. Built-in plugins are added by
//! [`builtin_catalog`]; embedding applications register their own factories
//! on top before the configuration is read.

use std::collections::HashMap;
use std::sync::Arc;

use hutch_core::HutchError;
use hutch_namespace::TypeCatalog;

use crate::builtins::{namespace, values};
use crate::plugin::Plugin;

/// Builds a plugin from its configuration section.
pub trait PluginFactory: Send + Sync {
    /// Create a new plugin instance from the section payload.
    fn create(&self, info: &serde_json::Value) -> Result<Box<dyn Plugin>, HutchError>;
}

impl<F> PluginFactory for F
where
    F: Fn(&serde_json::Value) -> Result<Box<dyn Plugin>, HutchError> + Send + Sync,
{
    fn create(&self, info: &serde_json::Value) -> Result<Box<dyn Plugin>, HutchError> {
        self(info)
    }
}

/// A single entry in the plugin catalog.
pub struct CatalogEntry {
    /// Section name that selects this plugin.
    pub name: String,
    /// One-line description shown by `hutch plugins`.
    pub description: String,
    /// Builds the plugin from its section payload.
    pub factory: Box<dyn PluginFactory>,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registry of plugin factories keyed by section name.
#[derive(Debug)]
pub struct PluginCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl PluginCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a factory under `name`, replacing any earlier registration.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        factory: impl PluginFactory + 'static,
    ) {
        let name = name.into();
        self.entries.insert(
            name.clone(),
            CatalogEntry {
                name,
                description: description.into(),
                factory: Box::new(factory),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Look up the factory for a section, failing with
    /// [`HutchError::PluginNotFound`].
    pub fn resolve(&self, name: &str) -> Result<&dyn PluginFactory, HutchError> {
        self.entries
            .get(name)
            .map(|entry| entry.factory.as_ref())
            .ok_or_else(|| HutchError::PluginNotFound {
                name: name.to_string(),
            })
    }

    /// List all entries, sorted by name.
    pub fn list_all(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Entries whose name or description contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = query.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&query)
                    || e.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog holding the built-in plugins.
///
/// - `namespace`: default class and metadata namespaces filled by hooks
/// - `values`: literal scalars and nested tables
pub fn builtin_catalog(types: Arc<TypeCatalog>) -> PluginCatalog {
    let mut catalog = PluginCatalog::new();
    catalog.register(
        namespace::NAME,
        "Class and metadata namespaces filled from later plugins",
        namespace::NamespaceFactory::new(types),
    );
    catalog.register(
        values::NAME,
        "Literal values and nested tables from the configuration",
        values::ValuesFactory,
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use hutch_core::Objects;

    struct Empty;

    impl Plugin for Empty {
        fn name(&self) -> &str {
            "empty"
        }

        fn get_objects(&mut self) -> Result<Objects, HutchError> {
            Ok(Objects::new())
        }
    }

    fn empty_factory(_info: &serde_json::Value) -> Result<Box<dyn Plugin>, HutchError> {
        Ok(Box::new(Empty))
    }

    #[test]
    fn register_and_resolve_roundtrip() {
        let mut catalog = PluginCatalog::new();
        catalog.register("empty", "Does nothing", empty_factory);

        let plugin = catalog
            .resolve("empty")
            .unwrap()
            .create(&serde_json::Value::Null)
            .unwrap();
        assert_eq!(plugin.name(), "empty");
        assert_eq!(catalog.get("empty").unwrap().description, "Does nothing");
    }

    #[test]
    fn resolve_unknown_is_plugin_not_found() {
        let catalog = PluginCatalog::new();
        let err = catalog.resolve("nope").err().unwrap();
        assert!(matches!(err, HutchError::PluginNotFound { ref name } if name == "nope"));
    }

    #[test]
    fn list_all_sorted_and_search() {
        let mut catalog = builtin_catalog(Arc::new(TypeCatalog::new()));
        catalog.register("empty", "Does nothing", empty_factory);

        let names: Vec<&str> = catalog.list_all().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "namespace", "values"]);
        assert_eq!(catalog.len(), 3);

        let found: Vec<&str> = catalog
            .search("LITERAL")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(found, vec!["values"]);
        assert!(catalog.search("zzz").is_empty());
    }
}
