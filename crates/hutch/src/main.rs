// SPDX-FileCopyrightText: 2026 Hutch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hutch - assemble a beamline environment from plugin configuration.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod environment;
mod manifest;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hutch_config::HutchConfig;
use hutch_namespace::TypeCatalog;
use hutch_plugin::{builtin_catalog, PluginStatus};

/// Hutch - assemble a beamline environment from plugin configuration.
#[derive(Parser, Debug)]
#[command(name = "hutch", version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of the standard hierarchy.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load an environment and list the objects it holds.
    Load {
        /// Plugin configuration document.
        conf: PathBuf,
    },
    /// List the plugins that configuration sections can name.
    Plugins {
        /// Only show plugins matching this text.
        query: Option<String>,
    },
    /// List the type names class namespaces can select.
    Types,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.settings {
        Some(path) => hutch_config::load_and_validate_path(path),
        None => hutch_config::load_and_validate(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(errors) => {
            hutch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&settings.environment.log_level);
    init_tracing(log_level);

    let types = Arc::new(TypeCatalog::new());
    let catalog = builtin_catalog(Arc::clone(&types));

    match cli.command {
        Commands::Load { conf } => {
            if let Err(errors) = run_load(&settings, &conf, &catalog, &types) {
                hutch_config::render_errors(&errors);
                std::process::exit(1);
            }
        }
        Commands::Plugins { query } => {
            let entries = match query.as_deref() {
                Some(q) => catalog.search(q),
                None => catalog.list_all(),
            };
            for entry in entries {
                println!("{:<20} {}", entry.name, entry.description);
            }
        }
        Commands::Types => {
            for name in types.names() {
                println!("{name}");
            }
        }
    }
}

fn run_load(
    settings: &HutchConfig,
    conf: &std::path::Path,
    catalog: &hutch_plugin::PluginCatalog,
    types: &TypeCatalog,
) -> Result<(), Vec<hutch_config::ConfigError>> {
    let sections = hutch_config::read_sections(conf).map_err(|err| vec![err])?;
    let env = environment::assemble(settings, &sections, catalog, types);

    for (name, obj) in env.namespace.iter() {
        println!("{name:<20} {}", obj.type_name());
    }
    for outcome in &env.report.outcomes {
        if matches!(outcome.status, PluginStatus::Failed { .. }) {
            eprintln!("{}: {}", outcome.name, outcome.status);
        }
        for hook in &outcome.hook_failures {
            eprintln!("{hook}: hook failed on objects from {}", outcome.name);
        }
    }
    eprintln!(
        "{}: {} objects available from {}",
        env.name,
        env.namespace.len(),
        env.module
    );
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hutch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_load_with_global_flags() {
        let cli = Cli::try_parse_from(["hutch", "load", "conf.toml", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Load { ref conf } if conf == &PathBuf::from("conf.toml")));
    }

    #[test]
    fn builtin_catalog_lists_plugins() {
        let catalog = builtin_catalog(Arc::new(TypeCatalog::new()));
        let names: Vec<&str> = catalog.list_all().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["namespace", "values"]);
    }
}
