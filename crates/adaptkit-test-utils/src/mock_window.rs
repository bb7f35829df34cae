// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock window host with recording output panels.

use std::sync::Arc;

use adaptkit_core::{Disposable, OutputPanel, WindowHost};

use crate::journal::{Journal, JournalEntry};

/// A window host that records panel activity and error notifications.
#[derive(Debug, Clone, Default)]
pub struct MockWindow {
    journal: Journal,
}

impl MockWindow {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Number of panels created with `name`.
    pub fn panels_created(&self, name: &str) -> usize {
        self.journal
            .count(&JournalEntry::PanelCreated(name.to_string()))
    }

    pub fn panels_disposed(&self, name: &str) -> usize {
        self.journal
            .count(&JournalEntry::PanelDisposed(name.to_string()))
    }
}

impl WindowHost for MockWindow {
    fn create_output_panel(&self, name: &str) -> Arc<dyn OutputPanel> {
        self.journal
            .record(JournalEntry::PanelCreated(name.to_string()));
        Arc::new(MockPanel {
            name: name.to_string(),
            journal: self.journal.clone(),
        })
    }

    fn show_error_message(&self, message: &str) {
        self.journal
            .record(JournalEntry::ErrorShown(message.to_string()));
    }
}

/// Output panel that appends its lines to the journal.
#[derive(Debug)]
pub struct MockPanel {
    name: String,
    journal: Journal,
}

impl OutputPanel for MockPanel {
    fn append_line(&self, line: &str) {
        self.journal.record(JournalEntry::PanelLine {
            panel: self.name.clone(),
            line: line.to_string(),
        });
    }
}

impl Disposable for MockPanel {
    fn dispose(&self) {
        self.journal
            .record(JournalEntry::PanelDisposed(self.name.clone()));
    }
}
