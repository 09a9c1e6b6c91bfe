// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide aliases for assembled environments.
//!
//! After a run, the binary publishes the final flat namespace under a module
//! name such as `mfx.db` (and the generic `hutch.db`). Code running later in
//! the same process can look it up by that name. Nothing in the loader reads
//! from here.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::namespace::Namespace;

/// Module name every environment is also published under.
pub const DEFAULT_MODULE: &str = "hutch.db";

fn modules() -> &'static RwLock<HashMap<String, Namespace>> {
    static MODULES: OnceLock<RwLock<HashMap<String, Namespace>>> = OnceLock::new();
    MODULES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Publish `namespace` under `module`, replacing any earlier one.
pub fn publish(module: &str, namespace: Namespace) {
    debug!(module = %module, entries = namespace.len(), "publishing environment module");
    modules()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(module.to_string(), namespace);
}

/// Look up a published module.
pub fn lookup(module: &str) -> Option<Namespace> {
    modules()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(module)
        .cloned()
}

/// Module name for an environment: `<name>.db`, or [`DEFAULT_MODULE`].
pub fn module_name(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{}.db", name.to_lowercase()),
        _ => DEFAULT_MODULE.to_string(),
    }
}
