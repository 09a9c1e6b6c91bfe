// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `db.txt` manifest: a plain-text list of what the last load produced,
//! for users browsing the environment directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use hutch_core::{HutchError, Registry};

pub const FILE_NAME: &str = "db.txt";

/// `<dir>/<name>/db.txt`
pub fn manifest_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name).join(FILE_NAME)
}

/// Manifest text for `registry`, stamped with `loaded_at`.
pub fn render(name: &str, registry: &Registry, loaded_at: DateTime<Local>) -> String {
    let mut text = format!(
        "The objects listed here are populated by hutch when loading {name}.\n\
         Import them from {name}.db after the environment has loaded.\n\n\
         last loaded on {}\n\
         with the following objects:\n\n",
        loaded_at.format("%Y-%m-%d %H:%M:%S")
    );
    for (obj_name, obj) in registry.iter() {
        // Infallible for String.
        let _ = writeln!(text, "{obj_name:<20} {}", obj.type_name());
    }
    text
}

/// Write the manifest, creating the environment directory if needed.
pub fn write_manifest(dir: &Path, name: &str, registry: &Registry) -> Result<PathBuf, HutchError> {
    let path = manifest_path(dir, name);
    let io_err = |source| HutchError::Manifest {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(&path, render(name, registry, Local::now())).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o666)).map_err(io_err)?;
    }
    Ok(path)
}
