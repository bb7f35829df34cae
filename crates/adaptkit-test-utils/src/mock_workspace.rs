// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock workspace host backed by a [`SettingsStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use adaptkit_config::SettingsStore;
use adaptkit_core::{
    AdaptKitError, AffectedKey, ConfigurationChangeEvent, Disposable, EventEmitter, Subscription,
    Uri, WorkspaceFolder, WorkspaceFoldersChangeEvent, WorkspaceHost,
};
use serde_json::Value;
use tracing::debug;

type RawKey = (String, String, Option<Uri>);

/// Workspace host whose settings and folder list are driven by the test.
///
/// Typed settings go through the wrapped [`SettingsStore`]. Values the store
/// would reject (wrong JSON type) can be injected with [`MockWorkspace::set_raw`].
pub struct MockWorkspace {
    settings: Arc<SettingsStore>,
    raw: Mutex<HashMap<RawKey, Value>>,
    raw_changes: EventEmitter<ConfigurationChangeEvent>,
    folders: Mutex<Vec<WorkspaceFolder>>,
    folder_changes: EventEmitter<WorkspaceFoldersChangeEvent>,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self::with_settings(Arc::new(SettingsStore::default()))
    }

    pub fn with_settings(settings: Arc<SettingsStore>) -> Self {
        Self {
            settings,
            raw: Mutex::new(HashMap::new()),
            raw_changes: EventEmitter::new(),
            folders: Mutex::new(Vec::new()),
            folder_changes: EventEmitter::new(),
        }
    }

    /// Start with `folders` already open.
    pub fn with_folders(folders: Vec<WorkspaceFolder>) -> Self {
        let workspace = Self::new();
        *workspace.lock_folders() = folders;
        workspace
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Set a typed setting (fires a change event if the value changed).
    pub fn set(
        &self,
        section: &str,
        key: &str,
        value: Value,
        scope: Option<&Uri>,
    ) -> Result<(), AdaptKitError> {
        self.settings.update(section, key, value, scope)
    }

    /// Set an arbitrary JSON value, bypassing type checks, and fire a change event.
    pub fn set_raw(&self, section: &str, key: &str, value: Value, scope: Option<&Uri>) {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((section.to_string(), key.to_string(), scope.cloned()), value);
        self.raw_changes
            .fire(&ConfigurationChangeEvent::new(vec![AffectedKey {
                key: format!("{section}.{key}"),
                scope: scope.cloned(),
            }]));
    }

    /// Fire a configuration change without changing any value.
    pub fn touch(&self, key: &str, scope: Option<&Uri>) {
        self.raw_changes
            .fire(&ConfigurationChangeEvent::new(vec![AffectedKey {
                key: key.to_string(),
                scope: scope.cloned(),
            }]));
    }

    /// Apply a folder change and announce it.
    pub fn change_folders(&self, added: Vec<WorkspaceFolder>, removed: Vec<WorkspaceFolder>) {
        {
            let mut folders = self.lock_folders();
            folders.retain(|f| !removed.iter().any(|r| r.uri == f.uri));
            folders.extend(added.iter().cloned());
        }
        debug!(added = added.len(), removed = removed.len(), "mock folders changed");
        self.folder_changes
            .fire(&WorkspaceFoldersChangeEvent { added, removed });
    }

    pub fn add_folder(&self, folder: WorkspaceFolder) {
        self.change_folders(vec![folder], Vec::new());
    }

    pub fn remove_folder(&self, folder: WorkspaceFolder) {
        self.change_folders(Vec::new(), vec![folder]);
    }

    /// Attached configuration listeners.
    pub fn configuration_listener_count(&self) -> usize {
        self.raw_changes.listener_count()
    }

    /// Attached folder listeners.
    pub fn folder_listener_count(&self) -> usize {
        self.folder_changes.listener_count()
    }

    fn lock_folders(&self) -> std::sync::MutexGuard<'_, Vec<WorkspaceFolder>> {
        self.folders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raw_value(&self, section: &str, key: &str, scope: Option<&Uri>) -> Option<Value> {
        let raw = self.raw.lock().unwrap_or_else(PoisonError::into_inner);
        let lookup = |scope: Option<&Uri>| {
            raw.get(&(section.to_string(), key.to_string(), scope.cloned()))
                .cloned()
        };
        scope.and_then(|s| lookup(Some(s))).or_else(|| lookup(None))
    }
}

impl Default for MockWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceHost for MockWorkspace {
    fn workspace_folders(&self) -> Vec<WorkspaceFolder> {
        self.lock_folders().clone()
    }

    fn configuration_value(&self, section: &str, key: &str, scope: Option<&Uri>) -> Option<Value> {
        self.raw_value(section, key, scope)
            .or_else(|| self.settings.get(section, key, scope))
    }

    fn on_did_change_configuration(
        &self,
        listener: Box<dyn Fn(&ConfigurationChangeEvent) + Send + Sync>,
    ) -> Subscription {
        let listener: Arc<dyn Fn(&ConfigurationChangeEvent) + Send + Sync> = Arc::from(listener);
        let typed = {
            let listener = Arc::clone(&listener);
            self.settings.on_did_change(move |event| listener(event))
        };
        let raw = self.raw_changes.subscribe_arc(listener);
        Subscription::new(move || {
            typed.dispose();
            raw.dispose();
        })
    }

    fn on_did_change_workspace_folders(
        &self,
        listener: Box<dyn Fn(&WorkspaceFoldersChangeEvent) + Send + Sync>,
    ) -> Subscription {
        self.folder_changes.subscribe(listener)
    }
}
