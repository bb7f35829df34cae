// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console-backed host implementations for the CLI.
//!
//! Output panels print to stdout, error notifications to stderr, and
//! configuration comes from a [`SettingsStore`] loaded from TOML.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use adaptkit_config::SettingsStore;
use adaptkit_core::{
    ConfigurationChangeEvent, Disposable, EventEmitter, OutputPanel, Subscription, Uri,
    WindowHost, WorkspaceFolder, WorkspaceFoldersChangeEvent, WorkspaceHost,
};
use tracing::debug;

/// Window host that writes panel lines to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleWindow;

impl WindowHost for ConsoleWindow {
    fn create_output_panel(&self, name: &str) -> Arc<dyn OutputPanel> {
        debug!(panel = name, "console panel opened");
        Arc::new(ConsolePanel {
            name: name.to_string(),
            stdout: Mutex::new(std::io::stdout()),
        })
    }

    fn show_error_message(&self, message: &str) {
        eprintln!("adaptkit: error: {message}");
    }
}

struct ConsolePanel {
    name: String,
    stdout: Mutex<std::io::Stdout>,
}

impl OutputPanel for ConsolePanel {
    fn append_line(&self, line: &str) {
        let mut stdout = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            debug!(panel = %self.name, error = %e, "stdout write failed");
        }
    }
}

impl Disposable for ConsolePanel {
    fn dispose(&self) {
        debug!(panel = %self.name, "console panel closed");
    }
}

/// Workspace host with a fixed folder list over a settings store.
pub struct StaticWorkspace {
    settings: Arc<SettingsStore>,
    folders: Vec<WorkspaceFolder>,
    folder_changes: EventEmitter<WorkspaceFoldersChangeEvent>,
}

impl StaticWorkspace {
    pub fn new(settings: Arc<SettingsStore>, folders: Vec<WorkspaceFolder>) -> Self {
        Self {
            settings,
            folders,
            folder_changes: EventEmitter::new(),
        }
    }
}

impl WorkspaceHost for StaticWorkspace {
    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }

    fn configuration_value(
        &self,
        section: &str,
        key: &str,
        scope: Option<&Uri>,
    ) -> Option<serde_json::Value> {
        self.settings.get(section, key, scope)
    }

    fn on_did_change_configuration(
        &self,
        listener: Box<dyn Fn(&ConfigurationChangeEvent) + Send + Sync>,
    ) -> Subscription {
        self.settings.on_did_change(listener)
    }

    // The folder list never changes for a single CLI invocation.
    fn on_did_change_workspace_folders(
        &self,
        listener: Box<dyn Fn(&WorkspaceFoldersChangeEvent) + Send + Sync>,
    ) -> Subscription {
        self.folder_changes.subscribe(listener)
    }
}
