// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static type descriptors, metadata records, and common collection aliases.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::object::Object;

/// Insertion-ordered mapping of object name to object, as produced by one plugin.
pub type Objects = IndexMap<String, Object>;

/// Parsed configuration document: section name to arbitrary payload, in document order.
pub type Sections = IndexMap<String, serde_json::Value>;

/// Static type descriptor for objects in the environment.
///
/// A kind carries its parent kinds, so a `Kind` specifier also matches
/// objects of derived kinds, and the static component declarations of
/// composite (device) kinds. Identity is the kind name.
///
/// Kinds are meant to be declared as constants:
///
/// ```
/// use hutch_core::{Component, Kind};
///
/// const APPLE: Kind = Kind::new("Apple");
/// const TREE: Kind = Kind {
///     name: "Tree",
///     parents: &[Kind::DEVICE],
///     components: &[Component { attr: "apples", kind: APPLE, lazy: false }],
/// };
///
/// assert!(TREE.is_a(Kind::DEVICE));
/// assert!(TREE.is_a(Kind::OBJECT));
/// assert!(!APPLE.is_a(TREE));
/// ```
#[derive(Clone, Copy)]
pub struct Kind {
    /// Unique type name.
    pub name: &'static str,
    /// Direct parent kinds.
    pub parents: &'static [Kind],
    /// Sub-components declared by this kind. Empty for non-composite kinds.
    pub components: &'static [Component],
}

/// A named sub-component declared on a composite kind.
#[derive(Debug, Clone, Copy)]
pub struct Component {
    /// Attribute name used to reach the component from its parent.
    pub attr: &'static str,
    /// Declared kind of the component.
    pub kind: Kind,
    /// Lazy components are not guaranteed to exist and are never traversed.
    pub lazy: bool,
}

impl Kind {
    /// Universal kind. Every object is-a `OBJECT`.
    pub const OBJECT: Kind = Kind::new("object");
    pub const INT: Kind = Kind::new("int");
    pub const FLOAT: Kind = Kind::new("float");
    pub const BOOL: Kind = Kind::new("bool");
    pub const STR: Kind = Kind::new("str");
    pub const FUNCTION: Kind = Kind::new("function");
    pub const NAMESPACE: Kind = Kind::new("namespace");
    /// Base kind for composite objects with named components.
    pub const DEVICE: Kind = Kind::new("device");

    /// A kind with no parents and no components.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parents: &[],
            components: &[],
        }
    }

    /// Returns true if `self` is `other` or derives from it.
    pub fn is_a(&self, other: Kind) -> bool {
        if other == Kind::OBJECT || *self == other {
            return true;
        }
        self.parents.iter().any(|parent| parent.is_a(other))
    }

    /// Returns true if the kind declares any components.
    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Optional attribute record attached to an object.
///
/// Fields keep their insertion order; a field may be present with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: IndexMap<String, Option<String>>,
}

impl Metadata {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Some(value.into()));
        self
    }

    /// Set a field, possibly to no value.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        self.fields.insert(key.into(), value);
    }

    /// Value of a field. Missing and valueless fields both read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut md = Metadata::new();
        for (k, v) in iter {
            md.set(k, Some(v.into()));
        }
        md
    }
}
