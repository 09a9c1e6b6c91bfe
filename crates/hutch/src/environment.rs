// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment assembly: run the plugins, add the default namespaces,
//! publish the result, and write the manifest.

use hutch_config::{HutchConfig, NamespacesConfig};
use hutch_core::{db, Namespace, Object, Registry, Sections};
use hutch_namespace::{class_namespace_named, metadata_namespace, TypeCatalog};
use hutch_plugin::{read_conf, PluginCatalog, RunReport};
use tracing::{debug, info, warn};

use crate::manifest;

/// Source recorded for objects added after the plugins ran.
pub const DEFAULT_SOURCE: &str = "hutch";

/// A fully assembled environment.
#[derive(Debug)]
pub struct Environment {
    /// Lowercased environment name.
    pub name: String,
    /// Module the namespace was published under.
    pub module: String,
    /// Per-plugin outcomes and the registry with default namespaces added.
    pub report: RunReport,
    /// Flat view of the final registry.
    pub namespace: Namespace,
}

/// Assemble an environment from settings and a plugin configuration.
pub fn assemble(
    settings: &HutchConfig,
    sections: &Sections,
    catalog: &PluginCatalog,
    types: &TypeCatalog,
) -> Environment {
    let name = settings.environment.display_name();
    info!(environment = %name, sections = sections.len(), "loading environment");

    let mut report = read_conf(sections, catalog);
    add_default_namespaces(&mut report.registry, &settings.namespaces, types);

    let namespace = report.registry.to_namespace();
    let module = settings.environment.module_name();
    db::publish(&module, namespace.clone());
    if module != db::DEFAULT_MODULE {
        db::publish(db::DEFAULT_MODULE, namespace.clone());
    }

    if let Some(dir) = &settings.environment.manifest_dir {
        match manifest::write_manifest(dir, &name, &report.registry) {
            Ok(path) => debug!(path = %path.display(), "wrote manifest"),
            Err(err) => warn!("{err}"),
        }
    }

    let failed = report.failed().len();
    info!(
        environment = %name,
        objects = report.registry.len(),
        failed,
        "environment loaded"
    );
    Environment {
        name,
        module,
        report,
        namespace,
    }
}

/// Add the configured class namespaces and the metadata branches.
///
/// Every namespace is built from the registry as the plugins left it, so
/// default namespaces never contain each other.
pub fn add_default_namespaces(
    registry: &mut Registry,
    config: &NamespacesConfig,
    types: &TypeCatalog,
) {
    let scope = registry.clone();

    for (type_name, aliases) in &config.classes {
        let ns = class_namespace_named(type_name, types, scope.iter());
        if ns.is_empty() {
            debug!(type_name = %type_name, "no objects of this type, skipping namespace");
            continue;
        }
        for alias in aliases {
            registry.insert(alias.as_str(), Object::Namespace(ns.clone()), DEFAULT_SOURCE);
        }
    }

    let md = metadata_namespace(&config.metadata_keys, scope.iter());
    for (branch, obj) in md.iter() {
        let leaves = obj.as_namespace().map_or(1, Namespace::count_leaves);
        if config.prune_single_leaf && leaves <= 1 {
            debug!(branch = %branch, "pruning single-object metadata branch");
            continue;
        }
        registry.insert(branch, obj, DEFAULT_SOURCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hutch_core::{Instance, Kind, Metadata};
    use serial_test::serial;
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[derive(Debug)]
    struct Tagged(Metadata);

    impl Instance for Tagged {
        fn kind(&self) -> Kind {
            Kind::new("Tagged")
        }

        fn metadata(&self) -> Option<&Metadata> {
            Some(&self.0)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn tagged(beamline: &str, stand: &str) -> Object {
        Object::instance(Tagged(
            Metadata::new().with("beamline", beamline).with("stand", stand),
        ))
    }

    #[test]
    fn default_namespaces_use_aliases_and_prune() {
        let mut reg = Registry::new();
        reg.insert("gain", Object::Float(2.5), "values");
        reg.insert("mfx_dia_a", tagged("MFX", "DIA"), "devices");
        reg.insert("mfx_dg2_b", tagged("MFX", "DG2"), "devices");
        reg.insert("xpp_sb2_c", tagged("XPP", "SB2"), "devices");

        let mut config = NamespacesConfig::default();
        config.classes.insert("float".to_string(), vec!["floats".to_string()]);
        config.classes.insert("bool".to_string(), vec!["bools".to_string()]);
        add_default_namespaces(&mut reg, &config, &TypeCatalog::new());

        let all = reg.get("all_objects").unwrap().as_namespace().unwrap().clone();
        assert_eq!(all.len(), 4);
        assert!(all.ptr_eq(reg.get("a").unwrap().as_namespace().unwrap()));
        assert_eq!(reg.get("floats").unwrap().as_namespace().unwrap().names(), vec!["gain"]);
        assert!(!reg.contains("bools"));

        // mfx holds two objects, xpp only one.
        assert!(reg.contains("mfx"));
        assert!(!reg.contains("xpp"));
        assert_eq!(reg.entry("mfx").unwrap().source, DEFAULT_SOURCE);
    }

    #[test]
    fn pruning_can_be_disabled() {
        let mut reg = Registry::new();
        reg.insert("xpp_sb2_c", tagged("XPP", "SB2"), "devices");
        let config = NamespacesConfig {
            prune_single_leaf: false,
            ..NamespacesConfig::default()
        };
        add_default_namespaces(&mut reg, &config, &TypeCatalog::new());
        assert!(reg.contains("xpp"));
    }

    #[test]
    #[serial]
    fn assemble_publishes_and_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = HutchConfig::default();
        settings.environment.name = Some("MFX".to_string());
        settings.environment.manifest_dir = Some(dir.path().to_path_buf());

        let sections: Sections = [(
            "values".to_string(),
            serde_json::json!({ "gain": 2.5, "mfx_dia_x": 1, "mfx_dg2_y": 2 }),
        )]
        .into_iter()
        .collect();
        let types = Arc::new(TypeCatalog::new());
        let catalog = hutch_plugin::builtin_catalog(Arc::clone(&types));

        let env = assemble(&settings, &sections, &catalog, &types);
        assert_eq!(env.name, "mfx");
        assert_eq!(env.module, "mfx.db");
        assert_eq!(env.namespace.get("gain"), Some(Object::Float(2.5)));
        assert_eq!(env.namespace.get_path("mfx.dia.x"), Some(Object::Int(1)));

        let published = db::lookup("mfx.db").unwrap();
        assert!(published.ptr_eq(&env.namespace));
        assert!(db::lookup(db::DEFAULT_MODULE).unwrap().ptr_eq(&env.namespace));

        let text = std::fs::read_to_string(dir.path().join("mfx").join("db.txt")).unwrap();
        assert!(text.contains("gain"));
        assert!(text.contains("all_objects"));
    }

    #[test]
    #[serial]
    #[traced_test]
    fn manifest_failure_is_logged_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let mut settings = HutchConfig::default();
        settings.environment.name = Some("XPP".to_string());
        settings.environment.manifest_dir = Some(blocker);

        let sections: Sections = [("values".to_string(), serde_json::json!({ "gain": 1.5 }))]
            .into_iter()
            .collect();
        let types = Arc::new(TypeCatalog::new());
        let catalog = hutch_plugin::builtin_catalog(Arc::clone(&types));

        let env = assemble(&settings, &sections, &catalog, &types);
        assert_eq!(env.namespace.get("gain"), Some(Object::Float(1.5)));
        assert!(db::lookup("xpp.db").unwrap().ptr_eq(&env.namespace));
        assert!(logs_contain("failed to write manifest"));
    }
}
