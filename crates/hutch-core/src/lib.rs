// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hutch environment loader.
//!
//! This crate provides the object model shared by every plugin and namespace
//! builder: the [`Object`] handle, static [`Kind`] descriptors with component
//! declarations, [`Metadata`] records, the [`Namespace`] tree node, and the
//! [`Registry`] that accumulates plugin output during a run.

pub mod db;
pub mod error;
pub mod namespace;
pub mod object;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HutchError;
pub use namespace::Namespace;
pub use object::{Function, Object};
pub use registry::{Entry, Registry};
pub use traits::{Device, Instance};
pub use types::{Component, Kind, Metadata, Objects, Sections};
