// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hutch environment loader.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across plugins, namespace builders, and the scheduler.
#[derive(Debug, Error)]
pub enum HutchError {
    /// Configuration errors (unreadable document, malformed section payload).
    #[error("configuration error: {0}")]
    Config(String),

    /// A configuration section named a plugin the catalog does not know.
    #[error("plugin not found: {name}")]
    PluginNotFound { name: String },

    /// A plugin failed while expanding pre-plugins or building its objects.
    #[error("plugin {plugin} failed: {message}")]
    Plugin {
        plugin: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A plugin hook failed while observing objects from a later plugin.
    #[error("hook on {plugin} failed for objects from {source_plugin}: {message}")]
    Hook {
        plugin: String,
        source_plugin: String,
        message: String,
    },

    /// A type specifier string could not be resolved.
    #[error("type {0} could not be loaded")]
    TypeNotFound(String),

    /// The manifest file could not be written.
    #[error("failed to write manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl HutchError {
    /// Shorthand for a plugin failure without an underlying source error.
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        HutchError::Plugin {
            plugin: plugin.into(),
            message: message.into(),
            source: None,
        }
    }
}
