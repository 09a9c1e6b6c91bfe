// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use std::collections::HashMap;

use crate::diagnostic::ConfigError;
use crate::model::HutchConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate deserialized settings.
///
/// Every problem is collected; validation does not stop at the first one.
pub fn validate_config(config: &HutchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let env = &config.environment;
    if !LOG_LEVELS.contains(&env.log_level.to_lowercase().as_str()) {
        fail(format!(
            "environment.log_level `{}` is not one of {}",
            env.log_level,
            LOG_LEVELS.join(", ")
        ));
    }
    if let Some(name) = &env.name {
        if name.trim().is_empty() {
            fail("environment.name must not be empty".to_string());
        } else if name.contains(['.', ' ', '/']) {
            fail(format!(
                "environment.name `{name}` must not contain dots, spaces, or slashes"
            ));
        }
    }

    let ns = &config.namespaces;
    if ns.metadata_keys.is_empty() {
        fail("namespaces.metadata_keys must list at least one key".to_string());
    }
    for (i, key) in ns.metadata_keys.iter().enumerate() {
        if key.trim().is_empty() {
            fail(format!("namespaces.metadata_keys[{i}] must not be empty"));
        }
    }

    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (type_name, aliases) in &ns.classes {
        if type_name.trim().is_empty() {
            fail("namespaces.classes has an empty type name".to_string());
        }
        if aliases.is_empty() {
            fail(format!("namespaces.classes.{type_name} must list at least one name"));
        }
        for alias in aliases {
            if alias.trim().is_empty() {
                fail(format!("namespaces.classes.{type_name} has an empty name"));
            } else if let Some(owner) = owners.insert(alias, type_name) {
                fail(format!(
                    "namespace name `{alias}` is used by both `{owner}` and `{type_name}`"
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
