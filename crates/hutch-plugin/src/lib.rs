// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin contract, plugin catalog, and the priority scheduler.
//!
//! Each top-level configuration section names a plugin. The catalog maps
//! section names to factories; the scheduler instantiates one plugin per
//! section, expands pre-plugins, and runs everything in descending priority
//! order while feeding each plugin's output to the hooks of the plugins that
//! ran before it. A failing plugin or hook is logged and skipped; the run
//! always completes.

pub mod builtins;
pub mod catalog;
pub mod plugin;
pub mod scheduler;

pub use catalog::{builtin_catalog, CatalogEntry, PluginCatalog, PluginFactory};
pub use plugin::Plugin;
pub use scheduler::{
    load_plugins, read_conf, run_plugins, PluginGroups, PluginOutcome, PluginStatus, RunReport,
};
