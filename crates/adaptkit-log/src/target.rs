// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log destinations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use adaptkit_core::{Disposable, OutputPanel, WindowHost};
use strum::Display;

use crate::file::FileTarget;

/// Which kind of destination a target writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
    Panel,
    File,
}

/// Writes lines to a named host output panel.
pub struct PanelTarget {
    panel: Arc<dyn OutputPanel>,
    disposed: AtomicBool,
}

impl PanelTarget {
    pub fn new(window: &dyn WindowHost, name: &str) -> Self {
        Self {
            panel: window.create_output_panel(name),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn write(&self, message: &str) {
        if !self.disposed.load(Ordering::Acquire) {
            self.panel.append_line(message);
        }
    }
}

impl Disposable for PanelTarget {
    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.panel.dispose();
        }
    }
}

/// One active log destination.
pub enum LogTarget {
    Panel(PanelTarget),
    File(FileTarget),
}

impl LogTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            LogTarget::Panel(_) => TargetKind::Panel,
            LogTarget::File(_) => TargetKind::File,
        }
    }

    pub fn write(&self, message: &str) {
        match self {
            LogTarget::Panel(panel) => panel.write(message),
            LogTarget::File(file) => file.write(message),
        }
    }

    /// Dispose, waiting for file writes to drain.
    pub async fn close(&self) {
        match self {
            LogTarget::Panel(panel) => panel.dispose(),
            LogTarget::File(file) => file.close().await,
        }
    }
}

impl Disposable for LogTarget {
    fn dispose(&self) {
        match self {
            LogTarget::Panel(panel) => panel.dispose(),
            LogTarget::File(file) => file.dispose(),
        }
    }
}
