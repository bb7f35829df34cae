// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configurable logger.
//!
//! A [`Log`] reads `<section>.logpanel` and `<section>.logfile` from the
//! workspace host and keeps a list of [`LogTarget`]s that matches them. The
//! list is rebuilt wholesale whenever one of those keys changes for the
//! logger's folder scope.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use adaptkit_core::{
    ConfigurationChangeEvent, Disposable, InspectOptions, LogLevel, Subscription, Uri,
    WindowHost, WorkspaceFolder, WorkspaceHost,
};
use chrono::Local;
use tracing::{debug, warn};

use crate::file::FileTarget;
use crate::format::{format_line, timestamp, LogArg};
use crate::inspect::{StructuralRenderer, ValueRenderer};
use crate::target::{LogTarget, PanelTarget, TargetKind};

/// Boolean key enabling the output panel target.
pub const LOGPANEL_KEY: &str = "logpanel";

/// String key naming the log file.
pub const LOGFILE_KEY: &str = "logfile";

/// Handle to a logger. Clones share the same targets and options.
#[derive(Clone)]
pub struct Log {
    inner: Arc<LogInner>,
}

struct LogInner {
    section: String,
    output_name: String,
    folder: Option<WorkspaceFolder>,
    workspace: Arc<dyn WorkspaceHost>,
    window: Arc<dyn WindowHost>,
    renderer: Arc<dyn ValueRenderer>,
    state: Mutex<LogState>,
    subscription: Mutex<Option<Subscription>>,
}

#[derive(Default)]
struct LogState {
    targets: Vec<Arc<LogTarget>>,
    default_options: InspectOptions,
    next_options: Option<InspectOptions>,
    disposed: bool,
}

/// Builder for [`Log`] with optional folder scope, renderer and options.
pub struct LogBuilder {
    section: String,
    output_name: String,
    folder: Option<WorkspaceFolder>,
    renderer: Arc<dyn ValueRenderer>,
    inspect_options: InspectOptions,
}

impl LogBuilder {
    /// Scope configuration lookups to `folder`.
    pub fn folder(mut self, folder: WorkspaceFolder) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn ValueRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Standing inspect options.
    pub fn inspect_options(mut self, options: InspectOptions) -> Self {
        self.inspect_options = options;
        self
    }

    /// Create the logger, configure its targets and start watching the
    /// configuration.
    pub fn build(self, workspace: Arc<dyn WorkspaceHost>, window: Arc<dyn WindowHost>) -> Log {
        let inner = Arc::new(LogInner {
            section: self.section,
            output_name: self.output_name,
            folder: self.folder,
            workspace,
            window,
            renderer: self.renderer,
            state: Mutex::new(LogState {
                default_options: self.inspect_options,
                ..LogState::default()
            }),
            subscription: Mutex::new(None),
        });

        inner.configure();

        let keys = [
            format!("{}.{LOGPANEL_KEY}", inner.section),
            format!("{}.{LOGFILE_KEY}", inner.section),
        ];
        let scope = inner.scope().cloned();
        let weak: Weak<LogInner> = Arc::downgrade(&inner);
        let subscription = inner.workspace.on_did_change_configuration(Box::new(
            move |event: &ConfigurationChangeEvent| {
                if keys
                    .iter()
                    .any(|key| event.affects_configuration(key, scope.as_ref()))
                    && let Some(inner) = weak.upgrade()
                {
                    inner.configure();
                }
            },
        ));
        *inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        Log { inner }
    }
}

impl Log {
    pub fn builder(section: impl Into<String>, output_name: impl Into<String>) -> LogBuilder {
        LogBuilder {
            section: section.into(),
            output_name: output_name.into(),
            folder: None,
            renderer: Arc::new(StructuralRenderer),
            inspect_options: InspectOptions::default(),
        }
    }

    /// Create a logger with the default renderer and options.
    pub fn new(
        section: impl Into<String>,
        folder: Option<WorkspaceFolder>,
        output_name: impl Into<String>,
        workspace: Arc<dyn WorkspaceHost>,
        window: Arc<dyn WindowHost>,
    ) -> Self {
        let mut builder = Self::builder(section, output_name);
        if let Some(folder) = folder {
            builder = builder.folder(folder);
        }
        builder.build(workspace, window)
    }

    pub fn section(&self) -> &str {
        &self.inner.section
    }

    pub fn folder(&self) -> Option<&WorkspaceFolder> {
        self.inner.folder.as_ref()
    }

    /// True iff at least one target is active.
    pub fn enabled(&self) -> bool {
        !self.inner.lock_state().targets.is_empty()
    }

    /// Kinds of the active targets, in order.
    pub fn target_kinds(&self) -> Vec<TargetKind> {
        self.inner
            .lock_state()
            .targets
            .iter()
            .map(|target| target.kind())
            .collect()
    }

    pub fn debug(&self, args: &[LogArg<'_>]) {
        self.log(LogLevel::Debug, args);
    }

    pub fn info(&self, args: &[LogArg<'_>]) {
        self.log(LogLevel::Info, args);
    }

    pub fn warn(&self, args: &[LogArg<'_>]) {
        self.log(LogLevel::Warn, args);
    }

    pub fn error(&self, args: &[LogArg<'_>]) {
        self.log(LogLevel::Error, args);
    }

    /// Format `args` and write the line to every active target.
    ///
    /// Consumes the next-call inspect override even when nothing is written.
    pub fn log(&self, level: LogLevel, args: &[LogArg<'_>]) {
        let options = {
            let mut state = self.inner.lock_state();
            let next = state.next_options.take();
            if state.targets.is_empty() {
                return;
            }
            match next {
                Some(next) => state.default_options.merged(&next),
                None => state.default_options.clone(),
            }
        };

        let line = format_line(
            level,
            &timestamp(Local::now()),
            args,
            self.inner.renderer.as_ref(),
            &options,
        );

        // Panels are host code and may call back into this log.
        let targets = self.inner.lock_state().targets.clone();
        for target in &targets {
            target.write(&line);
        }
    }

    pub fn set_default_inspect_options(&self, options: InspectOptions) {
        self.inner.lock_state().default_options = options;
    }

    pub fn update_default_inspect_options(&self, options: &InspectOptions) {
        let mut state = self.inner.lock_state();
        state.default_options = state.default_options.merged(options);
    }

    /// Override the inspect options for the next log call only.
    pub fn set_next_inspect_options(&self, options: InspectOptions) {
        self.inner.lock_state().next_options = Some(options);
    }

    /// Merge into the pending next-call override (or start one).
    pub fn update_next_inspect_options(&self, options: &InspectOptions) {
        let mut state = self.inner.lock_state();
        let pending = state.next_options.take().unwrap_or_default();
        state.next_options = Some(pending.merged(options));
    }

    /// Effective options the next log call would use, without consuming them.
    pub fn effective_inspect_options(&self) -> InspectOptions {
        let state = self.inner.lock_state();
        match &state.next_options {
            Some(next) => state.default_options.merged(next),
            None => state.default_options.clone(),
        }
    }

    /// Dispose and wait until every file target has written its queued lines.
    pub async fn shutdown(&self) {
        for target in self.inner.detach() {
            target.close().await;
        }
    }
}

impl Disposable for Log {
    fn dispose(&self) {
        self.inner.dispose();
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log")
            .field("section", &self.inner.section)
            .field("output_name", &self.inner.output_name)
            .field("folder", &self.inner.folder)
            .field("targets", &self.target_kinds())
            .finish()
    }
}

impl LogInner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scope(&self) -> Option<&Uri> {
        self.folder.as_ref().map(|f| &f.uri)
    }

    /// Rebuild the targets from the current configuration.
    fn configure(&self) {
        let old = {
            let mut state = self.lock_state();
            if state.disposed {
                return;
            }
            std::mem::take(&mut state.targets)
        };
        dispose_all(&old);
        drop(old);

        let scope = self.scope();
        let mut targets = Vec::new();

        let panel = self
            .workspace
            .configuration_value(&self.section, LOGPANEL_KEY, scope)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if panel {
            targets.push(Arc::new(LogTarget::Panel(PanelTarget::new(
                self.window.as_ref(),
                &self.output_name,
            ))));
        }

        let file = self
            .workspace
            .configuration_value(&self.section, LOGFILE_KEY, scope)
            .and_then(|v| v.as_str().map(str::to_owned))
            .filter(|path| !path.trim().is_empty());
        if let Some(path) = file {
            match FileTarget::open(&path, Arc::clone(&self.window)) {
                Ok(target) => targets.push(Arc::new(LogTarget::File(target))),
                Err(e) => {
                    warn!(section = %self.section, path = %path, error = %e, "could not open log file");
                    self.window
                        .show_error_message(&format!("Couldn't open log file {path}: {e}"));
                }
            }
        }

        let count = targets.len();
        let stale = {
            let mut state = self.lock_state();
            if state.disposed {
                targets
            } else {
                std::mem::replace(&mut state.targets, targets)
            }
        };
        dispose_all(&stale);

        debug!(
            section = %self.section,
            scope = ?scope.map(ToString::to_string),
            targets = count,
            "log targets configured"
        );
    }

    /// Release the subscription, mark disposed and hand back the targets.
    fn detach(&self) -> Vec<Arc<LogTarget>> {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.dispose();
        }

        let mut state = self.lock_state();
        state.disposed = true;
        std::mem::take(&mut state.targets)
    }

    fn dispose(&self) {
        let targets = self.detach();
        dispose_all(&targets);
    }
}

impl Drop for LogInner {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn dispose_all(targets: &[Arc<LogTarget>]) {
    for target in targets {
        target.dispose();
    }
}
