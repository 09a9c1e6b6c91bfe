// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings loader using Figment for layered merging.
//!
//! Files are merged in the order returned by [`settings_paths`], so
//! `./hutch.toml` beats `~/.config/hutch/hutch.toml`, which beats
//! `/etc/hutch/hutch.toml`. `HUTCH_*` environment variables beat every file.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HutchConfig;

const FILE_NAME: &str = "hutch.toml";

/// Sections whose keys may be set from the environment.
const ENV_SECTIONS: &[&str] = &["environment", "namespaces"];

/// Settings files in merge order, lowest precedence first.
pub fn settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/hutch").join(FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("hutch").join(FILE_NAME));
    }
    paths.push(PathBuf::from(FILE_NAME));
    paths
}

/// Load settings from the standard hierarchy with environment overrides.
pub fn load_config() -> Result<HutchConfig, figment::Error> {
    settings_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
        .extract()
}

/// Load settings from a TOML string only, without files or environment.
pub fn load_config_from_str(toml_content: &str) -> Result<HutchConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load settings from one file with environment overrides.
///
/// Used for `--settings`; the XDG hierarchy is not consulted.
pub fn load_config_from_path(path: &Path) -> Result<HutchConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(HutchConfig::default()))
}

/// Map a prefix-stripped, lowercased variable name to a settings key.
///
/// Only the section separator is replaced, so
/// `HUTCH_NAMESPACES_METADATA_KEYS` becomes `namespaces.metadata_keys`
/// rather than `namespaces.metadata.keys`.
pub fn env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

fn env_provider() -> Env {
    Env::prefixed("HUTCH_").map(|key| env_key(key.as_str()).into())
}
