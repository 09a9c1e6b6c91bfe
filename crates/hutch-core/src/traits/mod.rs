// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by domain objects contributed to the environment.

pub mod instance;

pub use instance::{Device, Instance};
