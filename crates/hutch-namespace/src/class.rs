// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Class namespaces: every object of a given kind, including matching
//! sub-components found inside devices.
//!
//! Device traversal works on the static component declarations of each kind.
//! The attribute paths leading to matches are computed once per kind and
//! memoized, because environments usually hold many instances of the same
//! device kind. Lazy components are skipped and never descended into.

use std::collections::HashMap;
use std::sync::Arc;

use hutch_core::{Kind, Namespace, Object};
use tracing::{debug, error, warn};

use crate::spec::{TypeCatalog, TypeSpec};

/// Attribute path from a device to one of its (nested) components.
pub type ComponentPath = Vec<&'static str>;

/// Decides which objects and sub-components match a specifier.
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    spec: TypeSpec,
    paths: HashMap<Kind, Arc<[ComponentPath]>>,
}

impl ClassMatcher {
    pub fn new(spec: TypeSpec) -> Self {
        Self {
            spec,
            paths: HashMap::new(),
        }
    }

    pub fn spec(&self) -> TypeSpec {
        self.spec
    }

    /// Returns true if `obj` itself matches.
    pub fn matches(&self, obj: &Object) -> bool {
        self.spec.matches(obj)
    }

    /// Number of kinds whose component paths have been analyzed.
    pub fn analyzed_kinds(&self) -> usize {
        self.paths.len()
    }

    /// Attribute paths from an instance of `kind` to every reachable,
    /// non-lazy component whose declared kind matches.
    pub fn component_paths(&mut self, kind: Kind) -> Arc<[ComponentPath]> {
        if let Some(paths) = self.paths.get(&kind) {
            return Arc::clone(paths);
        }
        // Placeholder so a kind that (transitively) declares itself terminates.
        self.paths.insert(kind, Arc::from(Vec::new()));

        let mut found: Vec<ComponentPath> = Vec::new();
        if kind.is_composite() {
            debug!(kind = %kind, "checking components for {}", self.spec);
        }
        for cpt in kind.components {
            if cpt.lazy {
                debug!(kind = %kind, attr = cpt.attr, "skipping lazy component");
                continue;
            }
            if self.spec.matches_kind(cpt.kind) {
                found.push(vec![cpt.attr]);
            }
            for sub in self.component_paths(cpt.kind).iter() {
                let mut path = Vec::with_capacity(sub.len() + 1);
                path.push(cpt.attr);
                path.extend_from_slice(sub);
                found.push(path);
            }
        }
        if kind.is_composite() {
            if found.is_empty() {
                debug!(kind = %kind, "no matching components");
            } else {
                debug!(kind = %kind, paths = ?found, "matching components");
            }
        }

        let found: Arc<[ComponentPath]> = Arc::from(found);
        self.paths.insert(kind, Arc::clone(&found));
        found
    }

    /// Every `(name, object)` pair that `name`/`obj` contributes: the object
    /// itself if it matches, then each matching sub-component under its own
    /// intrinsic name.
    pub fn collect(&mut self, name: &str, obj: &Object) -> Vec<(String, Object)> {
        let mut out = Vec::new();
        if self.matches(obj) {
            out.push((name.to_string(), obj.clone()));
        }
        let Some(device) = obj.as_device() else {
            return out;
        };
        let paths = self.component_paths(device.kind());
        for path in paths.iter() {
            match resolve_path(obj, path) {
                Some(component) => {
                    let cpt_name = match component.as_instance().and_then(|i| i.name()) {
                        Some(own) => own.to_string(),
                        None => {
                            let fallback = format!("{name}_{}", path.join("_"));
                            debug!(
                                device = %name,
                                path = %path.join("."),
                                "component has no name of its own, using {fallback}"
                            );
                            fallback
                        }
                    };
                    out.push((cpt_name, component));
                }
                None => {
                    debug!(
                        device = %name,
                        path = %path.join("."),
                        "declared component is not reachable, skipping"
                    );
                }
            }
        }
        out
    }
}

/// Walk an attribute path from a root device.
fn resolve_path(root: &Object, path: &[&str]) -> Option<Object> {
    let mut current = root.clone();
    for attr in path {
        current = current.as_device()?.component(attr)?;
    }
    Some(current)
}

/// Incrementally built class namespace.
#[derive(Debug, Clone)]
pub struct ClassNamespace {
    matcher: ClassMatcher,
    namespace: Namespace,
}

impl ClassNamespace {
    /// Start an empty namespace for `spec`.
    pub fn new(spec: TypeSpec) -> Self {
        Self::with_namespace(spec, Namespace::new())
    }

    /// Fill an existing namespace handle.
    pub fn with_namespace(spec: TypeSpec, namespace: Namespace) -> Self {
        Self {
            matcher: ClassMatcher::new(spec),
            namespace,
        }
    }

    /// Consider one object, adding it and any matching sub-components.
    pub fn add(&mut self, name: &str, obj: &Object) {
        for (found_name, found) in self.matcher.collect(name, obj) {
            debug!(name = %found_name, spec = %self.matcher.spec(), "adding to class namespace");
            if let Some(previous) = self.namespace.set(found_name.clone(), found.clone()) {
                if previous != found {
                    warn!(
                        name = %found_name,
                        "two objects named {found_name} match {}; keeping the most recent",
                        self.matcher.spec()
                    );
                }
            }
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn matcher(&self) -> &ClassMatcher {
        &self.matcher
    }

    pub fn into_namespace(self) -> Namespace {
        self.namespace
    }
}

/// Build a namespace of every object in `scope` matching `spec`.
///
/// `scope` is any sequence of `(name, object)` pairs; chain several
/// registries to search them in order.
pub fn class_namespace<'a, I>(spec: TypeSpec, scope: I) -> Namespace
where
    I: IntoIterator<Item = (&'a str, &'a Object)>,
{
    debug!(spec = %spec, "creating class namespace");
    let mut builder = ClassNamespace::new(spec);
    for (name, obj) in scope {
        builder.add(name, obj);
    }
    builder.into_namespace()
}

/// Like [`class_namespace`], resolving the specifier by name first.
///
/// An unknown type name is logged and yields an empty namespace.
pub fn class_namespace_named<'a, I>(type_name: &str, types: &TypeCatalog, scope: I) -> Namespace
where
    I: IntoIterator<Item = (&'a str, &'a Object)>,
{
    match types.resolve(type_name) {
        Ok(spec) => class_namespace(spec, scope),
        Err(err) => {
            error!(type_name = %type_name, "{err}");
            debug!(error = ?err, "type resolution failed");
            Namespace::new()
        }
    }
}
