// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priority scheduler.
//!
//! [`load_plugins`] turns configuration sections into priority groups,
//! expanding pre-plugins in place. [`run_plugins`] executes the groups in
//! descending priority order and merges every contribution into a
//! [`Registry`]. [`read_conf`] does both.
//!
//! Failures never abort a run. A plugin whose construction, expansion,
//! `get_objects`, or hook fails (or panics) is logged with a one-line summary
//! at error level and the full cause at debug level, then skipped.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use hutch_core::{HutchError, Registry, Sections};
use tracing::{debug, error, info, warn};

use crate::catalog::PluginCatalog;
use crate::plugin::Plugin;

/// Plugins grouped by effective priority. Within a group, execution order
/// is insertion order.
pub type PluginGroups = BTreeMap<i32, Vec<Box<dyn Plugin>>>;

/// How a single plugin fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginStatus {
    /// `get_objects` succeeded and contributed this many objects.
    Loaded { objects: usize },
    /// `get_objects` failed; nothing was contributed.
    Failed { message: String },
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginStatus::Loaded { objects } => write!(f, "loaded {objects} objects"),
            PluginStatus::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Execution record for one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutcome {
    /// Plugin name as reported by [`Plugin::name`], or the section name when
    /// the plugin could not be created.
    pub name: String,
    /// Effective priority (the parent's, for pre-plugins).
    pub priority: i32,
    /// Whether `get_objects` succeeded, and how many objects it produced.
    pub status: PluginStatus,
    /// Earlier plugins whose hooks failed on this plugin's objects.
    pub hook_failures: Vec<String>,
}

/// Result of a complete run.
#[derive(Debug)]
pub struct RunReport {
    /// Every merged object with the plugin that wrote it last.
    pub registry: Registry,
    /// One entry per executed plugin, in execution order.
    pub outcomes: Vec<PluginOutcome>,
}

impl RunReport {
    /// Names of plugins that loaded, in execution order.
    pub fn loaded(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PluginStatus::Loaded { .. }))
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Names of plugins whose `get_objects` failed, in execution order.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PluginStatus::Failed { .. }))
            .map(|o| o.name.as_str())
            .collect()
    }
}

/// Run `f`, converting a panic into a plugin error.
fn guarded<T>(plugin: &str, f: impl FnOnce() -> Result<T, HutchError>) -> Result<T, HutchError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(HutchError::plugin(
            plugin,
            format!("panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

fn report(stage: &str, err: &HutchError) {
    error!("{stage}: {err}");
    debug!(error = ?err, "{stage}");
}

/// Instantiate one plugin per section and group them by priority.
///
/// Sections with no catalog entry are skipped with a warning. Pre-plugins
/// are expanded recursively and run at their parent's priority, ahead of it.
pub fn load_plugins(sections: &Sections, catalog: &PluginCatalog) -> PluginGroups {
    let mut groups = PluginGroups::new();
    for (section, info) in sections {
        let factory = match catalog.resolve(section) {
            Ok(factory) => factory,
            Err(_) => {
                warn!(
                    section = %section,
                    "found {section} in configuration, but no plugin is registered under that name; skipping"
                );
                continue;
            }
        };
        let plugin = match guarded(section, || factory.create(info)) {
            Ok(plugin) => plugin,
            Err(err) => {
                report(&format!("could not create plugin for {section}"), &err);
                continue;
            }
        };
        let priority = plugin.priority();
        debug!(section = %section, plugin = plugin.name(), priority, "scheduled plugin");
        groups.entry(priority).or_default().extend(expand(plugin));
    }
    groups
}

/// The plugin preceded by its (recursively expanded) pre-plugins.
fn expand(plugin: Box<dyn Plugin>) -> Vec<Box<dyn Plugin>> {
    let name = plugin.name().to_string();
    let mut out = Vec::new();
    match guarded(&name, || plugin.pre_plugins()) {
        Ok(pre) => {
            for p in pre {
                debug!(plugin = %name, pre_plugin = p.name(), "expanding pre-plugin");
                out.extend(expand(p));
            }
        }
        Err(err) => report(&format!("could not expand pre-plugins of {name}"), &err),
    }
    out.push(plugin);
    out
}

/// Execute every group, highest priority first.
///
/// After each successful `get_objects`, every plugin that already executed
/// receives the new objects through its hooks, and then the objects are
/// merged into the registry. On a name collision the later contribution
/// wins. Failed plugins contribute nothing and receive no hooks.
pub fn run_plugins(groups: PluginGroups) -> RunReport {
    let mut registry = Registry::new();
    let mut executed: Vec<Box<dyn Plugin>> = Vec::new();
    let mut outcomes = Vec::new();

    for (priority, group) in groups.into_iter().rev() {
        for mut plugin in group {
            let name = plugin.name().to_string();
            info!(plugin = %name, priority, "loading {name}");

            let objects = match guarded(&name, || plugin.get_objects()) {
                Ok(objects) => objects,
                Err(err) => {
                    report(&format!("failed to load {name}"), &err);
                    outcomes.push(PluginOutcome {
                        name,
                        priority,
                        status: PluginStatus::Failed {
                            message: err.to_string(),
                        },
                        hook_failures: Vec::new(),
                    });
                    continue;
                }
            };

            let mut hook_failures = Vec::new();
            for prior in executed.iter_mut() {
                let prior_name = prior.name().to_string();
                if let Err(err) = guarded(&prior_name, || prior.future_plugin_hook(&name, &objects)) {
                    let err = HutchError::Hook {
                        plugin: prior_name.clone(),
                        source_plugin: name.clone(),
                        message: err.to_string(),
                    };
                    report(&format!("future hook on {prior_name} failed"), &err);
                    hook_failures.push(prior_name);
                }
            }

            let count = objects.len();
            registry.merge(objects, &name);
            info!(plugin = %name, objects = count, "loaded {name}");
            outcomes.push(PluginOutcome {
                name,
                priority,
                status: PluginStatus::Loaded { objects: count },
                hook_failures,
            });
            executed.push(plugin);
        }
    }

    RunReport { registry, outcomes }
}

/// Load and run every plugin named by `sections`.
pub fn read_conf(sections: &Sections, catalog: &PluginCatalog) -> RunReport {
    run_plugins(load_plugins(sections, catalog))
}
