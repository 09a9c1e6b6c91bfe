// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type specifiers and the startup-time catalog that resolves them by name.

use std::collections::HashMap;
use std::fmt;

use hutch_core::{HutchError, Kind, Object};

/// Name of the sentinel specifier that matches callables.
pub const CALLABLE_NAME: &str = "function";

/// What a class namespace selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpec {
    /// Objects whose kind is, or derives from, the given kind.
    Kind(Kind),
    /// Functions and other callables. Never matches instances.
    Callable,
}

impl TypeSpec {
    /// Returns true if `obj` belongs in a namespace for this specifier.
    pub fn matches(&self, obj: &Object) -> bool {
        match self {
            TypeSpec::Callable => obj.is_callable(),
            TypeSpec::Kind(kind) => obj.kind().is_a(*kind),
        }
    }

    /// Returns true if a declared component of `kind` would match.
    ///
    /// Components are always instances, so the callable specifier never
    /// matches one.
    pub fn matches_kind(&self, kind: Kind) -> bool {
        match self {
            TypeSpec::Callable => false,
            TypeSpec::Kind(target) => kind.is_a(*target),
        }
    }
}

impl From<Kind> for TypeSpec {
    fn from(kind: Kind) -> Self {
        TypeSpec::Kind(kind)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Kind(kind) => write!(f, "{kind}"),
            TypeSpec::Callable => f.write_str(CALLABLE_NAME),
        }
    }
}

/// Mapping from type name to specifier, populated at startup.
///
/// Seeded with the built-in kinds and the `function` sentinel; collaborators
/// register their own kinds before configuration is read.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, TypeSpec>,
}

impl TypeCatalog {
    /// Create a catalog holding the built-in kinds.
    pub fn new() -> Self {
        let mut catalog = Self {
            types: HashMap::new(),
        };
        for kind in [
            Kind::OBJECT,
            Kind::INT,
            Kind::FLOAT,
            Kind::BOOL,
            Kind::STR,
            Kind::NAMESPACE,
            Kind::DEVICE,
        ] {
            catalog.register(kind);
        }
        catalog.register_as(CALLABLE_NAME, TypeSpec::Callable);
        catalog
    }

    /// Register a kind under its own name.
    pub fn register(&mut self, kind: Kind) {
        self.register_as(kind.name, TypeSpec::Kind(kind));
    }

    /// Register a specifier under an explicit name.
    pub fn register_as(&mut self, name: impl Into<String>, spec: TypeSpec) {
        self.types.insert(name.into(), spec);
    }

    /// Resolve a type name.
    pub fn resolve(&self, name: &str) -> Result<TypeSpec, HutchError> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| HutchError::TypeNotFound(name.to_string()))
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hutch_core::Function;

    #[test]
    fn resolves_builtins_and_sentinel() {
        let types = TypeCatalog::new();
        assert_eq!(types.resolve("int").unwrap(), TypeSpec::Kind(Kind::INT));
        assert_eq!(types.resolve("function").unwrap(), TypeSpec::Callable);
        assert!(matches!(
            types.resolve("erqwerasd"),
            Err(HutchError::TypeNotFound(name)) if name == "erqwerasd"
        ));
    }

    #[test]
    fn registered_kinds_resolve() {
        const MOTOR: Kind = Kind::new("EpicsMotor");
        let mut types = TypeCatalog::new();
        types.register(MOTOR);
        assert_eq!(types.resolve("EpicsMotor").unwrap(), TypeSpec::Kind(MOTOR));
        assert!(types.names().contains(&"EpicsMotor"));
    }

    #[test]
    fn callable_never_matches_values() {
        let f = Object::from(Function::new("f", |_| Ok(Object::Int(0))));
        assert!(TypeSpec::Callable.matches(&f));
        assert!(!TypeSpec::Callable.matches(&Object::Int(1)));
        assert!(!TypeSpec::Callable.matches_kind(Kind::FUNCTION));
        assert!(TypeSpec::Kind(Kind::OBJECT).matches(&f));
    }
}
