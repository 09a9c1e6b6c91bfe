// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace builders.
//!
//! These regroup a flat collection of environment objects into secondary
//! views: by kind ([`class_namespace`]), by metadata attributes
//! ([`metadata_namespace`]), or by splitting object names
//! ([`tree_namespace`]). Every builder returns a fresh [`Namespace`] that
//! shares the underlying objects with its source.
//!
//! The incremental forms ([`ClassNamespace`], [`MetadataNamespace`]) accept
//! objects one at a time, which is how the `namespace` plugin keeps its views
//! current as later plugins run.

pub mod class;
pub mod metadata;
pub mod spec;
pub mod tree;

pub use class::{class_namespace, class_namespace_named, ClassMatcher, ClassNamespace};
pub use metadata::{metadata_namespace, strip_prefix, MetadataNamespace, NAME_SEPARATOR};
pub use spec::{TypeCatalog, TypeSpec};
pub use tree::tree_namespace;

pub use hutch_core::Namespace;
