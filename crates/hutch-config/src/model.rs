// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings model.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is an
//! error at startup rather than a silently ignored setting.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level engine settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HutchConfig {
    /// Environment identity and output locations.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Namespaces built over the final registry.
    #[serde(default)]
    pub namespaces: NamespacesConfig,
}

/// Identity of the environment being assembled.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment name, e.g. a beamline. Selects the `<name>.db` module.
    #[serde(default)]
    pub name: Option<String>,

    /// Directory receiving `<name>/db.txt` after each load. No manifest when unset.
    #[serde(default)]
    pub manifest_dir: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: None,
            manifest_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl EnvironmentConfig {
    /// Module the finished namespace is published under.
    pub fn module_name(&self) -> String {
        hutch_core::db::module_name(self.name.as_deref())
    }

    /// Name used in the manifest path and header.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "hutch".to_string())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default class and metadata namespaces.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamespacesConfig {
    /// Type name to the names its class namespace is registered under.
    ///
    /// A configured table replaces the default one as a whole. The field is
    /// left out of the serialized defaults layer so Figment cannot merge the
    /// two tables.
    #[serde(default = "default_classes", skip_serializing)]
    pub classes: BTreeMap<String, Vec<String>>,

    /// Metadata attributes that key the metadata tree, outermost first.
    #[serde(default = "default_metadata_keys")]
    pub metadata_keys: Vec<String>,

    /// Drop top-level metadata branches that hold a single object.
    #[serde(default = "default_prune_single_leaf")]
    pub prune_single_leaf: bool,
}

impl Default for NamespacesConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            metadata_keys: default_metadata_keys(),
            prune_single_leaf: default_prune_single_leaf(),
        }
    }
}

fn default_classes() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([(
        "object".to_string(),
        vec!["all_objects".to_string(), "a".to_string()],
    )])
}

fn default_metadata_keys() -> Vec<String> {
    vec!["beamline".to_string(), "stand".to_string()]
}

fn default_prune_single_leaf() -> bool {
    true
}
