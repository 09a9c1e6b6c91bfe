// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `namespace` plugin.
//!
//! Runs early and contributes empty namespaces, then fills them from its
//! hooks as lower-priority plugins produce objects:
//!
//! ```toml
//! [namespace.class]
//! float = ["floats", "f"]
//! function = "funcs"
//!
//! [namespace.metadata]
//! keys = ["beamline", "stand"]
//! name = "md"
//! ```
//!
//! Every alias of one class entry refers to the same namespace handle.

use std::sync::Arc;

use hutch_core::{HutchError, Namespace, Object, Objects};
use hutch_namespace::{ClassNamespace, MetadataNamespace, TypeCatalog};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::string_list;
use crate::catalog::PluginFactory;
use crate::plugin::Plugin;

pub const NAME: &str = "namespace";

/// Runs ahead of the default priority so its hooks see ordinary plugins.
pub const PRIORITY: i32 = 10;

/// Name of the metadata namespace when the section does not give one.
pub const DEFAULT_METADATA_NAME: &str = "md";

enum Manager {
    Class(ClassNamespace),
    Metadata(MetadataNamespace),
}

impl Manager {
    fn add(&mut self, name: &str, obj: &Object) {
        match self {
            Manager::Class(class) => class.add(name, obj),
            Manager::Metadata(md) => {
                md.add(name, obj);
            }
        }
    }
}

pub struct NamespacePlugin {
    info: serde_json::Map<String, Value>,
    types: Arc<TypeCatalog>,
    managers: Vec<Manager>,
}

impl NamespacePlugin {
    pub fn new(info: &Value, types: Arc<TypeCatalog>) -> Result<Self, HutchError> {
        let info = info.as_object().cloned().ok_or_else(|| {
            HutchError::Config(format!("[{NAME}] must be a table, found {info}"))
        })?;
        Ok(Self {
            info,
            types,
            managers: Vec::new(),
        })
    }

    fn class_spaces(&mut self, opts: &Value, objs: &mut Objects) {
        let Some(table) = opts.as_object() else {
            warn!(plugin = NAME, "class namespaces must be a table of type to names, skipping");
            return;
        };
        for (type_name, names) in table {
            let spec = match self.types.resolve(type_name) {
                Ok(spec) => spec,
                Err(err) => {
                    error!(plugin = NAME, "{err}");
                    continue;
                }
            };
            let Some(names) = string_list(names) else {
                warn!(plugin = NAME, type_name = %type_name, "namespace names must be strings, skipping");
                continue;
            };
            debug!(plugin = NAME, spec = %spec, names = ?names, "creating class namespace");
            let namespace = Namespace::new();
            for name in names {
                contribute(objs, name, &namespace);
            }
            self.managers
                .push(Manager::Class(ClassNamespace::with_namespace(spec, namespace)));
        }
    }

    fn metadata_space(&mut self, opts: &Value, objs: &mut Objects) {
        let (keys, name) = match opts {
            Value::Object(table) => {
                let keys = table.get("keys").and_then(string_list);
                let name = match table.get("name") {
                    Some(name) => name.as_str().map(str::to_string),
                    None => Some(DEFAULT_METADATA_NAME.to_string()),
                };
                (keys, name)
            }
            other => (string_list(other), Some(DEFAULT_METADATA_NAME.to_string())),
        };
        let (Some(keys), Some(name)) = (keys, name) else {
            warn!(plugin = NAME, "metadata namespace needs a list of keys and a name, skipping");
            return;
        };
        debug!(plugin = NAME, keys = ?keys, name = %name, "creating metadata namespace");
        let namespace = Namespace::new();
        contribute(objs, name, &namespace);
        self.managers
            .push(Manager::Metadata(MetadataNamespace::with_namespace(&keys, namespace)));
    }
}

fn contribute(objs: &mut Objects, name: String, namespace: &Namespace) {
    if objs
        .insert(name.clone(), Object::Namespace(namespace.clone()))
        .is_some()
    {
        warn!(plugin = NAME, name = %name, "namespace requested twice, keeping the last");
    }
}

impl Plugin for NamespacePlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    fn get_objects(&mut self) -> Result<Objects, HutchError> {
        let mut objs = Objects::new();
        let info = std::mem::take(&mut self.info);
        for (space, opts) in &info {
            match space.as_str() {
                "class" => self.class_spaces(opts, &mut objs),
                "metadata" => self.metadata_space(opts, &mut objs),
                other => warn!(plugin = NAME, "namespace category {other} is not defined, skipping"),
            }
        }
        self.info = info;
        Ok(objs)
    }

    fn future_object_hook(&mut self, name: &str, obj: &Object) -> Result<(), HutchError> {
        for manager in &mut self.managers {
            manager.add(name, obj);
        }
        Ok(())
    }
}

pub struct NamespaceFactory {
    types: Arc<TypeCatalog>,
}

impl NamespaceFactory {
    pub fn new(types: Arc<TypeCatalog>) -> Self {
        Self { types }
    }
}

impl PluginFactory for NamespaceFactory {
    fn create(&self, info: &Value) -> Result<Box<dyn Plugin>, HutchError> {
        Ok(Box::new(NamespacePlugin::new(info, Arc::clone(&self.types))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn plugin(info: Value) -> NamespacePlugin {
        NamespacePlugin::new(&info, Arc::new(TypeCatalog::new())).unwrap()
    }

    fn later_objects() -> Objects {
        let mut objs = Objects::new();
        objs.insert("x".into(), Object::Float(1.5));
        objs.insert("mfx_dia_y".into(), Object::Int(2));
        objs.insert("word".into(), Object::from("hi"));
        objs
    }

    #[test]
    fn aliases_share_one_namespace() {
        let mut ns = plugin(json!({ "class": { "float": ["floats", "f"] } }));
        let objs = ns.get_objects().unwrap();
        assert_eq!(objs.len(), 2);

        ns.future_plugin_hook("values", &later_objects()).unwrap();
        let floats = objs["floats"].as_namespace().unwrap();
        let f = objs["f"].as_namespace().unwrap();
        assert!(floats.ptr_eq(f));
        assert_eq!(floats.names(), vec!["x"]);
    }

    #[test]
    fn metadata_namespace_fills_from_hooks() {
        let mut ns = plugin(json!({ "metadata": { "keys": ["beamline", "stand"] } }));
        let objs = ns.get_objects().unwrap();
        let md = objs[DEFAULT_METADATA_NAME].as_namespace().unwrap().clone();
        assert!(md.is_empty());

        ns.future_plugin_hook("values", &later_objects()).unwrap();
        assert_eq!(md.get_path("mfx.dia.y"), Some(Object::Int(2)));
    }

    #[test]
    fn metadata_keys_may_be_a_bare_list() {
        let mut ns = plugin(json!({ "metadata": ["beamline"] }));
        let objs = ns.get_objects().unwrap();
        assert!(objs.contains_key("md"));
    }

    #[test]
    #[traced_test]
    fn unknown_type_and_category_are_skipped() {
        let mut ns = plugin(json!({
            "class": { "erqwerasd": "bad", "str": "words" },
            "shapes": { "x": 1 }
        }));
        let objs = ns.get_objects().unwrap();
        assert_eq!(objs.keys().collect::<Vec<_>>(), vec!["words"]);
        assert!(logs_contain("type erqwerasd could not be loaded"));
        assert!(logs_contain("namespace category shapes is not defined"));
    }

    #[test]
    fn non_table_info_is_rejected() {
        let err = NamespacePlugin::new(&json!([1, 2]), Arc::new(TypeCatalog::new()))
            .err()
            .unwrap();
        assert!(matches!(err, HutchError::Config(_)));
    }
}
