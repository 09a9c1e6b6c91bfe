// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `values` plugin: literal objects straight from the configuration.
//!
//! ```toml
//! [values]
//! gain = 2.5
//! operator = "alice"
//!
//! [values.limits]
//! low = -3
//! high = 3
//! ```
//!
//! Tables become namespaces; `limits.low` above is reachable as a path.

use hutch_core::{HutchError, Namespace, Object, Objects};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::PluginFactory;
use crate::plugin::Plugin;

pub const NAME: &str = "values";

pub struct ValuesPlugin {
    info: serde_json::Map<String, Value>,
}

impl ValuesPlugin {
    pub fn new(info: &Value) -> Result<Self, HutchError> {
        let info = info.as_object().cloned().ok_or_else(|| {
            HutchError::Config(format!("[{NAME}] must be a table, found {info}"))
        })?;
        Ok(Self { info })
    }
}

/// Convert one configuration value. Arrays, nulls and integers that do not
/// fit in an `i64` have no object form and yield `None`.
fn to_object(path: &str, value: &Value) -> Option<Object> {
    match value {
        Value::Bool(b) => Some(Object::Bool(*b)),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(Object::Int(i)),
            (None, Some(f)) if !n.is_u64() => Some(Object::Float(f)),
            _ => {
                warn!(plugin = NAME, name = %path, "integer {n} is out of range, skipping");
                None
            }
        },
        Value::String(s) => Some(Object::from(s.as_str())),
        Value::Object(table) => {
            let ns = Namespace::new();
            for (key, item) in table {
                if let Some(obj) = to_object(&format!("{path}.{key}"), item) {
                    ns.set(key.clone(), obj);
                }
            }
            Some(Object::Namespace(ns))
        }
        Value::Array(_) | Value::Null => {
            warn!(plugin = NAME, name = %path, "no object form for {value}, skipping");
            None
        }
    }
}

impl Plugin for ValuesPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn get_objects(&mut self) -> Result<Objects, HutchError> {
        let mut objs = Objects::new();
        for (name, value) in &self.info {
            if let Some(obj) = to_object(name, value) {
                debug!(plugin = NAME, name = %name, type_name = obj.type_name(), "loaded value");
                objs.insert(name.clone(), obj);
            }
        }
        Ok(objs)
    }
}

pub struct ValuesFactory;

impl PluginFactory for ValuesFactory {
    fn create(&self, info: &Value) -> Result<Box<dyn Plugin>, HutchError> {
        Ok(Box::new(ValuesPlugin::new(info)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn literals_become_scalars() {
        let mut plugin = ValuesPlugin::new(&json!({
            "gain": 2.5,
            "count": 3,
            "on": true,
            "who": "alice"
        }))
        .unwrap();
        let objs = plugin.get_objects().unwrap();
        assert_eq!(objs["gain"], Object::Float(2.5));
        assert_eq!(objs["count"], Object::Int(3));
        assert_eq!(objs["on"], Object::Bool(true));
        assert_eq!(objs["who"], Object::from("alice"));
        assert_eq!(
            objs.keys().collect::<Vec<_>>(),
            vec!["gain", "count", "on", "who"]
        );
    }

    #[test]
    fn tables_become_namespaces() {
        let mut plugin =
            ValuesPlugin::new(&json!({ "limits": { "low": -3, "inner": { "x": 1.0 } } })).unwrap();
        let objs = plugin.get_objects().unwrap();
        let limits = objs["limits"].as_namespace().unwrap();
        assert_eq!(limits.get("low"), Some(Object::Int(-3)));
        assert_eq!(limits.get_path("inner.x"), Some(Object::Float(1.0)));
    }

    #[test]
    #[traced_test]
    fn arrays_and_huge_integers_are_skipped() {
        let mut plugin = ValuesPlugin::new(&json!({
            "list": [1, 2],
            "huge": u64::MAX,
            "ok": 1
        }))
        .unwrap();
        let objs = plugin.get_objects().unwrap();
        assert_eq!(objs.keys().collect::<Vec<_>>(), vec!["ok"]);
        assert!(logs_contain("no object form"));
        assert!(logs_contain("out of range"));
    }
}
