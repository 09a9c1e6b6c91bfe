// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name trees: branches taken from the underscore-separated segments of each
//! object's name.

use hutch_core::{Namespace, Object};
use tracing::debug;

use crate::metadata::{strip_prefix, NAME_SEPARATOR};

/// Build a tree from object names.
///
/// `mfx_dia_obj1` lands at `mfx.dia.obj1`: every segment but the last is a
/// lowercased branch key. Names without a separator are skipped.
pub fn tree_namespace<'a, I>(scope: I) -> Namespace
where
    I: IntoIterator<Item = (&'a str, &'a Object)>,
{
    let root = Namespace::new();
    for (name, obj) in scope {
        let segments: Vec<&str> = name.split(NAME_SEPARATOR).collect();
        let keys: Vec<&str> = segments[..segments.len() - 1]
            .iter()
            .copied()
            .filter(|s| !s.is_empty())
            .collect();
        if keys.is_empty() {
            debug!(name = %name, "no branch segments, skipping");
            continue;
        }

        debug!(name = %name, "adding to tree namespace");
        let mut level = root.clone();
        let mut leaf = name;
        for key in keys {
            leaf = strip_prefix(leaf, key);
            level = level.child(&key.to_lowercase());
        }
        level.insert_checked(leaf, obj.clone());
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn splits_names_into_branches() {
        let objs = [
            ("mfx_dia_obj1", Object::Int(1)),
            ("mfx_dia_obj2", Object::Int(2)),
            ("XPP_obj3", Object::Int(3)),
            ("solo", Object::Int(4)),
        ];
        let tree = tree_namespace(objs.iter().map(|(k, v)| (*k, v)));
        assert_eq!(tree.get_path("mfx.dia.obj1"), Some(Object::Int(1)));
        assert_eq!(tree.get_path("mfx.dia.obj2"), Some(Object::Int(2)));
        assert_eq!(tree.get_path("xpp.obj3"), Some(Object::Int(3)));
        assert!(!tree.contains("solo"));
        assert_eq!(tree.count_leaves(), 3);
    }

    #[test]
    #[traced_test]
    fn duplicate_leaves_warn_and_keep_latest() {
        let objs = [("mfx_obj", Object::Int(1)), ("MFX_obj", Object::Int(2))];
        let tree = tree_namespace(objs.iter().map(|(k, v)| (*k, v)));
        assert_eq!(tree.get_path("mfx.obj"), Some(Object::Int(2)));
        assert!(logs_contain("already held it"));
    }
}
