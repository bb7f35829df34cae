// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AdaptKit - logger and executable locator for editor test adapters.
//!
//! This is the binary entry point. It runs the logger against console-backed
//! host implementations and the TOML settings store.

mod host;
mod locate;
mod log;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adaptkit_config::{AdaptKitConfig, ConfigError};
use adaptkit_core::LogLevel;
use clap::{Args, Parser, Subcommand};

use crate::locate::run_locate;
use crate::log::{run_log, LogCommand};

/// AdaptKit - logger and executable locator for editor test adapters.
#[derive(Parser, Debug)]
#[command(name = "adaptkit", version, about, long_about = None)]
struct Cli {
    /// Explicit configuration file (default: XDG lookup plus ./adaptkit.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Level for AdaptKit's own diagnostics (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    trace_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the path of an executable found on the PATH.
    Locate {
        /// Executable name, e.g. `node`.
        name: String,
    },
    /// Write one line through the configured log targets.
    Log(LogArgs),
}

#[derive(Args, Debug)]
struct LogArgs {
    /// Level of the line.
    #[arg(long, default_value = "info", value_parser = parse_level)]
    level: LogLevel,

    /// Workspace folder whose settings scope the log.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// JSON value appended to the line and rendered structurally (repeatable).
    #[arg(long = "value")]
    values: Vec<String>,

    /// Message text.
    #[arg(required = true)]
    words: Vec<String>,
}

fn parse_level(raw: &str) -> Result<LogLevel, String> {
    raw.parse()
        .map_err(|_| format!("unknown level `{raw}` (expected debug, info, warn or error)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.trace_level);

    match cli.command {
        Commands::Locate { name } => run_locate(&name).await,
        Commands::Log(args) => {
            let config = match load_config(cli.config.as_deref()) {
                Ok(config) => config,
                Err(errors) => {
                    adaptkit_config::render_errors(&errors);
                    return ExitCode::FAILURE;
                }
            };
            run_log(
                config,
                LogCommand {
                    level: args.level,
                    folder: args.folder,
                    values: args.values,
                    words: args.words,
                },
            )
            .await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AdaptKitConfig, Vec<ConfigError>> {
    match path {
        Some(path) => adaptkit_config::load_and_validate_path(path),
        None => adaptkit_config::load_and_validate(),
    }
}

/// Initialize the tracing subscriber with an env-filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adaptkit={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
