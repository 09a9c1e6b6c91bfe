// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata namespaces: nested branches keyed by metadata attribute values.
//!
//! With keys `["beamline", "stand"]`, an object `mfx_dia_obj1` whose metadata
//! reads `beamline = MFX, stand = DIA` lands at `mfx.dia.obj1`. Objects
//! without metadata fall back to the leading segments of their name. Branch
//! keys are lowercased, and each consumed key is stripped from the front of
//! the leaf name when it matches.

use hutch_core::{Namespace, Object};
use tracing::debug;

/// Separator between name segments.
pub const NAME_SEPARATOR: char = '_';

/// Remove `key` and the following separator from the front of `name`.
///
/// The match is ASCII case-insensitive and must end on a segment boundary.
/// Names that would become empty are returned unchanged.
pub fn strip_prefix<'n>(name: &'n str, key: &str) -> &'n str {
    match name.get(..key.len()) {
        Some(head) if head.eq_ignore_ascii_case(key) => {
            match name[key.len()..].strip_prefix(NAME_SEPARATOR) {
                Some(rest) if !rest.is_empty() => rest,
                _ => name,
            }
        }
        _ => name,
    }
}

/// Incrementally built metadata namespace.
#[derive(Debug, Clone)]
pub struct MetadataNamespace {
    keys: Vec<String>,
    namespace: Namespace,
}

impl MetadataNamespace {
    /// Start an empty tree keyed by `keys`, in order.
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        Self::with_namespace(keys, Namespace::new())
    }

    /// Fill an existing namespace handle.
    pub fn with_namespace<S: AsRef<str>>(keys: &[S], namespace: Namespace) -> Self {
        Self {
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
            namespace,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Branch keys for an object: metadata values in key order, or leading
    /// name segments when the object has no metadata.
    ///
    /// Values are lowercased; absent or empty values read as `None`.
    pub fn derive_keys(&self, name: &str, obj: &Object) -> Vec<Option<String>> {
        let raw: Vec<Option<&str>> = match obj.metadata() {
            Some(md) => self.keys.iter().map(|k| md.get(k)).collect(),
            None => {
                let segments: Vec<&str> = name.split(NAME_SEPARATOR).collect();
                // The last segment is the leaf name and never a key.
                let usable = &segments[..segments.len().saturating_sub(1)];
                (0..self.keys.len())
                    .map(|i| usable.get(i).copied())
                    .collect()
            }
        };
        raw.into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_lowercase))
            .collect()
    }

    /// Place one object in the tree. Returns false if it was excluded because
    /// its first key is absent.
    pub fn add(&self, name: &str, obj: &Object) -> bool {
        let keys = self.derive_keys(name, obj);
        if keys.first().is_none_or(Option::is_none) {
            debug!(name = %name, "no value for first metadata key, excluding");
            return false;
        }

        debug!(name = %name, "adding to metadata namespace");
        let mut level = self.namespace.clone();
        let mut leaf = name;
        for key in keys.iter() {
            let Some(key) = key else {
                break;
            };
            leaf = strip_prefix(leaf, key);
            level = level.child(key);
        }
        level.insert_checked(leaf, obj.clone());
        true
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn into_namespace(self) -> Namespace {
        self.namespace
    }
}

/// Build a tree of `scope` keyed by the metadata attributes `keys`.
///
/// The tree is never pruned here. Callers that want a flatter view drop
/// branches with a single leaf themselves (see [`Namespace::count_leaves`]).
pub fn metadata_namespace<'a, S, I>(keys: &[S], scope: I) -> Namespace
where
    S: AsRef<str>,
    I: IntoIterator<Item = (&'a str, &'a Object)>,
{
    let builder = MetadataNamespace::new(keys);
    debug!(keys = ?builder.keys(), "creating metadata namespace");
    for (name, obj) in scope {
        builder.add(name, obj);
    }
    builder.into_namespace()
}
