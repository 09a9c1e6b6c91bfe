// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugins compiled into every Hutch build.

pub mod namespace;
pub mod values;

/// Read a string or a list of strings.
pub(crate) fn string_list(value: &serde_json::Value) -> Option<Vec<String>> {
    match value {
        serde_json::Value::String(s) => Some(vec![s.clone()]),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_list_accepts_scalar_or_list() {
        assert_eq!(string_list(&json!("md")), Some(vec!["md".to_string()]));
        assert_eq!(
            string_list(&json!(["a", "b"])),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(string_list(&json!(["a", 1])), None);
        assert_eq!(string_list(&json!(3)), None);
    }
}
