// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin configuration document.
//!
//! Each top-level key names a plugin; its value is handed to that plugin's
//! factory as JSON. Document order is kept, since it breaks ties between
//! plugins of equal priority.
//!
//! ```toml
//! [namespace.class]
//! int = "ints"
//!
//! [values]
//! gain = 2.5
//! ```

use std::path::Path;

use hutch_core::Sections;
use miette::{NamedSource, SourceSpan};
use serde_json::Value;
use tracing::debug;

use crate::diagnostic::ConfigError;

/// Parse a plugin configuration document. `name` labels diagnostics.
pub fn parse_sections(name: &str, content: &str) -> Result<Sections, ConfigError> {
    let table: toml::Table = toml::from_str(content).map_err(|err| ConfigError::Document {
        name: name.to_string(),
        message: err.message().to_string(),
        span: err
            .span()
            .map(|range| SourceSpan::new(range.start.into(), range.len())),
        src: Some(NamedSource::new(name, content.to_string())),
    })?;
    let sections: Sections = table.into_iter().map(|(k, v)| (k, to_json(v))).collect();
    debug!(document = %name, sections = ?sections.keys().collect::<Vec<_>>(), "parsed plugin configuration");
    Ok(sections)
}

/// Read and parse a plugin configuration file.
pub fn read_sections(path: &Path) -> Result<Sections, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::Other(format!("could not read {}: {err}", path.display())))?;
    parse_sections(&path.display().to_string(), &content)
}

fn to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        // NaN and infinities have no JSON form.
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, to_json(v))).collect())
        }
    }
}
