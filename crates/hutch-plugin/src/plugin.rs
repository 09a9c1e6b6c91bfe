// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The contract every configuration-driven contributor implements.

use hutch_core::{HutchError, Object, Objects};

/// A named, prioritized unit of configuration-driven object construction.
///
/// One plugin is constructed per configuration section per run.
/// [`get_objects`](Plugin::get_objects) is called exactly once. After that,
/// the plugin observes the output of every plugin that runs after it through
/// its hooks. Plugins never observe their own output.
pub trait Plugin: Send {
    /// Name of the plugin, reported as the source of its objects.
    fn name(&self) -> &str;

    /// Larger priorities run earlier. Plugins with equal priority run in
    /// configuration order.
    fn priority(&self) -> i32 {
        0
    }

    /// Plugins this one requires. They run at this plugin's priority,
    /// immediately before it, whatever their own priority says.
    fn pre_plugins(&self) -> Result<Vec<Box<dyn Plugin>>, HutchError> {
        Ok(Vec::new())
    }

    /// Build the objects this plugin contributes, keyed by their final name.
    fn get_objects(&mut self) -> Result<Objects, HutchError>;

    /// Called once per object produced by each later plugin.
    ///
    /// Implementations must not mutate the incoming object.
    fn future_object_hook(&mut self, _name: &str, _obj: &Object) -> Result<(), HutchError> {
        Ok(())
    }

    /// Called once per later plugin with its whole contribution.
    ///
    /// Override this to treat the incoming objects as a group. The default
    /// forwards each object to [`future_object_hook`](Plugin::future_object_hook).
    fn future_plugin_hook(&mut self, _source: &str, objs: &Objects) -> Result<(), HutchError> {
        for (name, obj) in objs {
            self.future_object_hook(name, obj)?;
        }
        Ok(())
    }
}
