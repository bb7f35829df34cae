// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared, ordered record of everything the mocks observed.
//!
//! All mocks built from the same [`Journal`] append to one list, so tests can
//! assert on the relative order of host calls (for example that an adapter
//! was unregistered before it was disposed).

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    PanelCreated(String),
    PanelLine { panel: String, line: String },
    PanelDisposed(String),
    ErrorShown(String),
    AdapterCreated(String),
    AdapterDisposed(String),
    Registered(String),
    Unregistered(String),
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: JournalEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Lines appended to the panel called `panel`, in order.
    pub fn panel_lines(&self, panel: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                JournalEntry::PanelLine { panel: p, line } if p == panel => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Error notifications shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                JournalEntry::ErrorShown(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Entries matching `pred`, in order.
    pub fn filter(&self, pred: impl Fn(&JournalEntry) -> bool) -> Vec<JournalEntry> {
        self.entries().into_iter().filter(|e| pred(e)).collect()
    }

    /// Position of the first entry equal to `entry`.
    pub fn position(&self, entry: &JournalEntry) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn count(&self, entry: &JournalEntry) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}
