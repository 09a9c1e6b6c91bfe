// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for settings loading and the plugin document.

use std::io::Write;

use hutch_config::diagnostic::ConfigError;
use hutch_config::loader::env_key;
use hutch_config::model::HutchConfig;
use hutch_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, read_sections,
};

#[test]
fn valid_toml_deserializes_into_hutch_config() {
    let toml = r#"
[environment]
name = "MFX"
manifest_dir = "/tmp/hutch"
log_level = "debug"

[namespaces]
metadata_keys = ["beamline"]
prune_single_leaf = false

[namespaces.classes]
function = ["funcs"]
device = ["devices", "d"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.environment.name.as_deref(), Some("MFX"));
    assert_eq!(
        config.environment.manifest_dir.as_deref(),
        Some(std::path::Path::new("/tmp/hutch"))
    );
    assert_eq!(config.environment.log_level, "debug");
    assert_eq!(config.namespaces.metadata_keys, vec!["beamline"]);
    assert!(!config.namespaces.prune_single_leaf);
    assert_eq!(config.namespaces.classes.len(), 2);
    assert_eq!(config.namespaces.classes["device"], vec!["devices", "d"]);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert!(config.environment.name.is_none());
    assert!(config.environment.manifest_dir.is_none());
    assert_eq!(config.environment.log_level, "info");
    assert_eq!(config.namespaces.classes["object"], vec!["all_objects", "a"]);
    assert_eq!(config.namespaces.metadata_keys, vec!["beamline", "stand"]);
    assert!(config.namespaces.prune_single_leaf);
}

#[test]
fn configured_classes_replace_defaults() {
    let config = load_config_from_str("[namespaces.classes]\nint = [\"ints\"]\n")
        .expect("classes table should deserialize");
    assert_eq!(config.namespaces.classes.len(), 1);
    assert_eq!(config.namespaces.classes["int"], vec!["ints"]);
    assert!(!config.namespaces.classes.contains_key("object"));
}

#[test]
fn default_aliases_can_be_reused() {
    let config = load_and_validate_str("[namespaces.classes]\nint = [\"a\", \"all_objects\"]\n")
        .expect("default aliases are free once classes are configured");
    assert_eq!(config.namespaces.classes["int"], vec!["a", "all_objects"]);
}

#[test]
fn empty_classes_table_disables_class_namespaces() {
    let config = load_config_from_str("[namespaces.classes]\n").expect("empty table is valid");
    assert!(config.namespaces.classes.is_empty());
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = "[environment]\nnaem = \"mfx\"\n";
    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "naem");
            assert_eq!(suggestion.as_deref(), Some("name"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn wrong_type_is_reported() {
    let toml = "[namespaces]\nprune_single_leaf = \"yes\"\n";
    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidType { detail, .. } if detail.contains("boolean")
    )));
}

#[test]
fn validation_runs_after_loading() {
    let toml = "[environment]\nlog_level = \"chatty\"\n";
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("chatty")));
}

#[test]
fn override_layer_beats_file() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    // Same key shape the HUTCH_ environment provider produces.
    let key = env_key("environment_name");
    let config: HutchConfig = Figment::new()
        .merge(Serialized::defaults(HutchConfig::default()))
        .merge(Toml::string("[environment]\nname = \"from-toml\"\n"))
        .merge((key.as_str(), "xpp"))
        .extract()
        .expect("should merge override");
    assert_eq!(config.environment.name.as_deref(), Some("xpp"));
}

#[test]
fn settings_file_by_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[environment]\nname = \"cxi\"").unwrap();
    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.environment.module_name(), "cxi.db");
}

#[test]
fn plugin_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[values]\nx = 1\n\n[namespace.metadata]\nkeys = [\"beamline\"]"
    )
    .unwrap();
    let sections = read_sections(file.path()).expect("document should parse");
    assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["values", "namespace"]);
    assert_eq!(sections["namespace"]["metadata"]["keys"][0], "beamline");
}
