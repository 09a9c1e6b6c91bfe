// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree nodes for grouping environment objects.
//!
//! A `Namespace` is a shared handle: clones see the same children. This lets a
//! plugin hand out a namespace from `get_objects` and keep filling it from its
//! hooks while the registry already holds it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::warn;

use crate::object::Object;
use crate::types::Objects;

/// A node with uniquely named children, each a terminal object or another namespace.
#[derive(Clone, Default)]
pub struct Namespace {
    inner: Arc<RwLock<IndexMap<String, Object>>>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace holding the given objects.
    pub fn from_objects(objects: Objects) -> Self {
        Self {
            inner: Arc::new(RwLock::new(objects)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Object>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Object>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a direct child.
    pub fn get(&self, name: &str) -> Option<Object> {
        self.read().get(name).cloned()
    }

    /// Look up a nested child by dotted path, e.g. `mfx.dia.obj1`.
    pub fn get_path(&self, path: &str) -> Option<Object> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_namespace()?.get(part)?;
        }
        Some(current)
    }

    /// Set a child, returning the value it replaced.
    pub fn set(&self, name: impl Into<String>, obj: Object) -> Option<Object> {
        self.write().insert(name.into(), obj)
    }

    /// Set a child, warning if the name was already taken. The new value is kept.
    ///
    /// Returns true if the name was free.
    pub fn insert_checked(&self, name: impl Into<String>, obj: Object) -> bool {
        let name = name.into();
        let replaced = self.set(name.clone(), obj);
        if replaced.is_some() {
            warn!(
                name = %name,
                "tried to add {name} to a namespace that already held it; keeping the most recent"
            );
        }
        replaced.is_none()
    }

    /// Get the child namespace `name`, creating it if needed.
    ///
    /// A terminal object already stored under `name` is replaced by the new
    /// namespace, with a warning.
    pub fn child(&self, name: &str) -> Namespace {
        let mut children = self.write();
        if let Some(existing) = children.get(name) {
            if let Some(ns) = existing.as_namespace() {
                return ns.clone();
            }
            warn!(
                name = %name,
                "replacing {} stored under {name} with a namespace branch",
                existing.type_name()
            );
        }
        let ns = Namespace::new();
        children.insert(name.to_string(), Object::Namespace(ns.clone()));
        ns
    }

    /// Remove a child, returning it.
    pub fn remove(&self, name: &str) -> Option<Object> {
        self.write().shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Number of direct children. Nested namespaces count as one.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Child names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Snapshot of the children in insertion order.
    pub fn entries(&self) -> Vec<(String, Object)> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Iterate over a snapshot of the children.
    pub fn iter(&self) -> impl Iterator<Item = (String, Object)> {
        self.entries().into_iter()
    }

    /// Snapshot of the children as a plain ordered map.
    pub fn to_objects(&self) -> Objects {
        self.read().clone()
    }

    /// Count the terminal objects in this tree, descending into nested namespaces.
    pub fn count_leaves(&self) -> usize {
        self.read()
            .values()
            .map(|obj| match obj {
                Object::Namespace(ns) => ns.count_leaves(),
                _ => 1,
            })
            .sum()
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        *self.read() == *other.read()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.read().iter()).finish()
    }
}

impl FromIterator<(String, Object)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (String, Object)>>(iter: I) -> Self {
        Namespace::from_objects(iter.into_iter().collect())
    }
}
