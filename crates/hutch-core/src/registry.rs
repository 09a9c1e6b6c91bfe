// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat, insertion-ordered accumulation of every object produced during a run.
//!
//! Every write records the plugin that made it. A later write for the same
//! name replaces the object (last write wins) but keeps the name's original
//! position in iteration order.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::namespace::Namespace;
use crate::object::Object;
use crate::types::Objects;

/// A registry entry: the object and the plugin that wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The registered object.
    pub object: Object,
    /// Name of the plugin whose contribution placed the object here.
    pub source: String,
}

/// The running collection of environment objects.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one object written by `source`, returning the entry it shadowed.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        object: Object,
        source: impl Into<String>,
    ) -> Option<Entry> {
        let name = name.into();
        let source = source.into();
        let previous = self.entries.insert(
            name.clone(),
            Entry {
                object,
                source: source.clone(),
            },
        );
        if let Some(ref prev) = previous {
            info!(
                name = %name,
                previous = %prev.source,
                source = %source,
                "{source} overrides {name} from {}",
                prev.source
            );
        }
        previous
    }

    /// Merge a whole plugin contribution, in its order.
    pub fn merge(&mut self, objects: Objects, source: &str) {
        debug!(source = %source, count = objects.len(), "merging objects into registry");
        for (name, object) in objects {
            self.insert(name, object, source);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.entries.get(name).map(|e| &e.object)
    }

    /// Entry for `name`, including which plugin wrote it.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of direct entries. A namespace counts as one entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, object)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), &e.object))
    }

    /// Iterate `(name, entry)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Export the flat contents as a traversable namespace.
    pub fn to_namespace(&self) -> Namespace {
        Namespace::from_objects(self.to_objects())
    }

    /// Snapshot of the flat contents without provenance.
    pub fn to_objects(&self) -> Objects {
        self.entries
            .iter()
            .map(|(k, e)| (k.clone(), e.object.clone()))
            .collect()
    }

    /// Consume the registry into its flat contents.
    pub fn into_objects(self) -> Objects {
        self.entries
            .into_iter()
            .map(|(k, e)| (k, e.object))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn iteration_is_insertion_order() {
        let mut reg = Registry::new();
        reg.insert("zebra", Object::Int(1), "a");
        reg.insert("alpha", Object::Int(2), "a");
        reg.insert("middle", Object::Int(3), "b");
        let names: Vec<&str> = reg.names().collect();
        assert_eq!(names, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    #[traced_test]
    fn last_write_wins_and_is_attributed() {
        let mut reg = Registry::new();
        reg.insert("name", Object::from("first"), "high");
        let shadowed = reg.insert("name", Object::from("second"), "low");
        assert_eq!(shadowed.unwrap().source, "high");
        assert_eq!(reg.get("name"), Some(&Object::from("second")));
        assert_eq!(reg.entry("name").unwrap().source, "low");
        assert_eq!(reg.len(), 1);
        assert!(logs_contain("low overrides name from high"));
    }

    #[test]
    fn namespaces_count_as_one_entry() {
        let mut reg = Registry::new();
        let ns = Namespace::new();
        ns.set("a", Object::Int(1));
        ns.set("b", Object::Int(2));
        reg.insert("group", Object::Namespace(ns), "ns");
        reg.insert("c", Object::Int(3), "values");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn merge_and_export() {
        let mut reg = Registry::new();
        let mut objs = Objects::new();
        objs.insert("one".into(), Object::Int(1));
        objs.insert("two".into(), Object::Float(2.0));
        reg.merge(objs, "values");
        let ns = reg.to_namespace();
        assert_eq!(ns.get("one"), Some(Object::Int(1)));
        assert_eq!(ns.names(), vec!["one", "two"]);
        let flat = reg.into_objects();
        assert_eq!(flat.len(), 2);
    }
}
