// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace-level services: folders and configuration.

use crate::event::{ConfigurationChangeEvent, Subscription, WorkspaceFoldersChangeEvent};
use crate::types::{Uri, WorkspaceFolder};

/// The editor workspace as seen by the logger and the registrar.
pub trait WorkspaceHost: Send + Sync {
    /// Folders currently open, in workspace order.
    fn workspace_folders(&self) -> Vec<WorkspaceFolder>;

    /// Read `<section>.<key>` as seen from `scope` (folder value first, then global).
    fn configuration_value(
        &self,
        section: &str,
        key: &str,
        scope: Option<&Uri>,
    ) -> Option<serde_json::Value>;

    /// Subscribe to configuration changes.
    fn on_did_change_configuration(
        &self,
        listener: Box<dyn Fn(&ConfigurationChangeEvent) + Send + Sync>,
    ) -> Subscription;

    /// Subscribe to workspace folders being added or removed.
    fn on_did_change_workspace_folders(
        &self,
        listener: Box<dyn Fn(&WorkspaceFoldersChangeEvent) + Send + Sync>,
    ) -> Subscription;
}
