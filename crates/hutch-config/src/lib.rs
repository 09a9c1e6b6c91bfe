// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Hutch environment loader.
//!
//! Two documents are involved:
//!
//! - Engine settings ([`HutchConfig`]): environment name, manifest location,
//!   log level, and default namespaces. Layered with Figment from an XDG file
//!   hierarchy plus `HUTCH_*` environment overrides, rejected on unknown keys,
//!   and reported through miette diagnostics with typo suggestions.
//! - The plugin configuration ([`Sections`](hutch_core::Sections)): a TOML
//!   document whose top-level tables name plugins, kept in document order.
//!
//! # Usage
//!
//! ```no_run
//! use hutch_config::{load_and_validate, read_sections};
//!
//! let settings = load_and_validate().expect("settings errors");
//! let sections = read_sections("beamline.toml".as_ref()).expect("plugin conf errors");
//! println!("{} sections for {}", sections.len(), settings.environment.module_name());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod sections;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{EnvironmentConfig, HutchConfig, NamespacesConfig};
pub use sections::{parse_sections, read_sections};

/// Load settings from the XDG hierarchy and validate them.
///
/// Returns either valid settings or every diagnostic found.
pub fn load_and_validate() -> Result<HutchConfig, Vec<ConfigError>> {
    validated(loader::load_config(), collect_toml_sources)
}

/// Load settings from one file (plus environment overrides) and validate them.
pub fn load_and_validate_path(path: &Path) -> Result<HutchConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load settings from a TOML string and validate them.
pub fn load_and_validate_str(toml_content: &str) -> Result<HutchConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn validated(
    loaded: Result<HutchConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<HutchConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of every settings file that exists, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::settings_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let shown = std::path::absolute(&path).unwrap_or(path);
            Some((shown.display().to_string(), content))
        })
        .collect()
}
