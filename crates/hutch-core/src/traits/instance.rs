// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain object traits.
//!
//! The loader never constructs domain objects itself. Collaborators wrap them
//! in [`Instance`] so the namespace builders can inspect their kind, metadata,
//! and (for composites) their named components.

use std::any::Any;
use std::fmt;

use crate::object::Object;
use crate::types::{Kind, Metadata};

/// A domain object placed in the environment by a plugin.
pub trait Instance: Any + Send + Sync + fmt::Debug {
    /// Static kind of this object.
    fn kind(&self) -> Kind;

    /// Intrinsic name of the object, independent of the registry key or
    /// attribute path used to reach it.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Metadata record, if the object carries one.
    fn metadata(&self) -> Option<&Metadata> {
        None
    }

    /// Composite view of this object, if it is a device.
    fn as_device(&self) -> Option<&dyn Device> {
        None
    }

    /// Upcast used for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A composite object whose kind declares named components.
///
/// The declarations live on [`Kind::components`]; this trait resolves them
/// against a live instance.
pub trait Device: Instance {
    /// The instantiated component behind `attr`, if it exists.
    fn component(&self, attr: &str) -> Option<Object>;
}

impl dyn Instance {
    /// Downcast to a concrete instance type.
    pub fn downcast_ref<T: Instance>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
