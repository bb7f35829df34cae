// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `adaptkit log` command.
//!
//! Builds a [`Log`] over the console window and the loaded settings, writes
//! one line and shuts the log down so queued file writes reach the disk.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use adaptkit_config::{AdaptKitConfig, SettingsStore};
use adaptkit_core::{LogLevel, WorkspaceFolder};
use adaptkit_log::{Log, LogArg};
use tracing::debug;

use crate::host::{ConsoleWindow, StaticWorkspace};

/// Arguments of `adaptkit log`, after parsing.
#[derive(Debug)]
pub struct LogCommand {
    pub level: LogLevel,
    pub folder: Option<PathBuf>,
    pub values: Vec<String>,
    pub words: Vec<String>,
}

pub async fn run_log(config: AdaptKitConfig, command: LogCommand) -> ExitCode {
    let values: Vec<serde_json::Value> = match command
        .values
        .iter()
        .map(|raw| serde_json::from_str(raw).map_err(|e| format!("invalid --value `{raw}`: {e}")))
        .collect()
    {
        Ok(values) => values,
        Err(message) => {
            eprintln!("adaptkit: {message}");
            return ExitCode::FAILURE;
        }
    };

    let folder = command.folder.as_deref().map(folder_from_path);
    let section = config.log.section.clone();
    let mut builder =
        Log::builder(&section, &config.log.output_name).inspect_options(config.log.inspect.clone());
    if let Some(folder) = &folder {
        builder = builder.folder(folder.clone());
    }

    let settings = Arc::new(SettingsStore::new(config));
    let workspace = Arc::new(StaticWorkspace::new(settings, folder.into_iter().collect()));
    let log = builder.build(workspace, Arc::new(ConsoleWindow));

    if !log.enabled() {
        eprintln!(
            "adaptkit: no log targets are enabled for section `{section}` (set {section}.logpanel or {section}.logfile)"
        );
    }

    let mut args: Vec<LogArg<'_>> = command.words.iter().map(LogArg::from).collect();
    args.extend(values.iter().map(|v| LogArg::value(v)));
    log.log(command.level, &args);
    debug!(level = %command.level, targets = ?log.target_kinds(), "line logged");

    log.shutdown().await;
    ExitCode::SUCCESS
}

fn folder_from_path(path: &Path) -> WorkspaceFolder {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    WorkspaceFolder::local(absolute, 0)
}
