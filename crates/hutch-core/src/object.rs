// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Object` handle stored in registries and namespaces.

use std::fmt;
use std::sync::Arc;

use crate::error::HutchError;
use crate::namespace::Namespace;
use crate::traits::{Device, Instance};
use crate::types::{Kind, Metadata};

type Callable = dyn Fn(&[Object]) -> Result<Object, HutchError> + Send + Sync;

/// A named callable contributed to the environment.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    call: Arc<Callable>,
}

impl Function {
    /// Wrap a closure as a callable object.
    pub fn new<F>(name: impl Into<Arc<str>>, call: F) -> Self
    where
        F: Fn(&[Object]) -> Result<Object, HutchError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Object]) -> Result<Object, HutchError> {
        (self.call)(args)
    }

    /// Returns true if both handles point to the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Any value that can live in the environment.
///
/// Cloning is cheap: instances, functions, and namespaces are shared handles.
#[derive(Clone, Debug)]
pub enum Object {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Function(Function),
    Instance(Arc<dyn Instance>),
    Namespace(Namespace),
}

impl Object {
    /// Wrap a domain object.
    pub fn instance<T: Instance>(value: T) -> Self {
        Object::Instance(Arc::new(value))
    }

    /// Static kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Int(_) => Kind::INT,
            Object::Float(_) => Kind::FLOAT,
            Object::Bool(_) => Kind::BOOL,
            Object::Str(_) => Kind::STR,
            Object::Function(_) => Kind::FUNCTION,
            Object::Instance(inst) => inst.kind(),
            Object::Namespace(_) => Kind::NAMESPACE,
        }
    }

    /// Name of the object's concrete type, as written to the manifest.
    pub fn type_name(&self) -> &'static str {
        self.kind().name
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Object::Function(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Object::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Object::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Object::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Arc<dyn Instance>> {
        match self {
            Object::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Object::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    /// Device view of an instance, if it is composite.
    pub fn as_device(&self) -> Option<&dyn Device> {
        self.as_instance().and_then(|inst| inst.as_device())
    }

    /// Metadata record of an instance, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.as_instance().and_then(|inst| inst.metadata())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Int(a), Object::Int(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Bool(a), Object::Bool(b)) => a == b,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => a.ptr_eq(b),
            (Object::Instance(a), Object::Instance(b)) => Arc::ptr_eq(a, b),
            (Object::Namespace(a), Object::Namespace(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Object::Int(v)
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Object::Float(v)
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Object::Bool(v)
    }
}

impl From<&str> for Object {
    fn from(v: &str) -> Self {
        Object::Str(v.to_string())
    }
}

impl From<String> for Object {
    fn from(v: String) -> Self {
        Object::Str(v)
    }
}

impl From<Function> for Object {
    fn from(v: Function) -> Self {
        Object::Function(v)
    }
}

impl From<Namespace> for Object {
    fn from(v: Namespace) -> Self {
        Object::Namespace(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget;

    impl Instance for Widget {
        fn kind(&self) -> Kind {
            Kind::new("Widget")
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn kinds_of_builtin_values() {
        assert_eq!(Object::from(1_i64).kind(), Kind::INT);
        assert_eq!(Object::from(2.0_f64).kind(), Kind::FLOAT);
        assert_eq!(Object::from("x").kind(), Kind::STR);
        assert_eq!(Object::from(true).kind(), Kind::BOOL);
        assert_eq!(Object::from(Namespace::new()).type_name(), "namespace");
    }

    #[test]
    fn functions_compare_by_identity() {
        let f = Function::new("four", |_| Ok(Object::Int(4)));
        let g = Function::new("four", |_| Ok(Object::Int(4)));
        assert_eq!(Object::from(f.clone()), Object::from(f.clone()));
        assert_ne!(Object::from(f.clone()), Object::from(g));
        assert_eq!(f.call(&[]).unwrap(), Object::Int(4));
        assert!(Object::from(f).is_callable());
    }

    #[test]
    fn instances_downcast_and_compare_by_identity() {
        let a = Object::instance(Widget);
        let b = Object::instance(Widget);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.type_name(), "Widget");
        assert!(a.as_instance().unwrap().downcast_ref::<Widget>().is_some());
        assert!(a.as_device().is_none());
        assert!(a.metadata().is_none());
    }
}
