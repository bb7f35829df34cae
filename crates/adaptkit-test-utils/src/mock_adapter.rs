// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock adapters, adapter factory and hub.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use adaptkit_core::{AdapterFactory, AdapterHub, Disposable, WorkspaceFolder};

use crate::journal::{Journal, JournalEntry};

/// Adapter bound to one folder; records its disposal.
#[derive(Debug)]
pub struct MockAdapter {
    folder: WorkspaceFolder,
    journal: Journal,
    disposals: AtomicUsize,
}

impl MockAdapter {
    pub fn new(folder: WorkspaceFolder, journal: Journal) -> Self {
        Self {
            folder,
            journal,
            disposals: AtomicUsize::new(0),
        }
    }

    pub fn folder(&self) -> &WorkspaceFolder {
        &self.folder
    }

    /// Journal label: the folder URI.
    pub fn label(&self) -> String {
        self.folder.uri.to_string()
    }

    /// How many times `dispose` was called.
    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }
}

impl Disposable for MockAdapter {
    fn dispose(&self) {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        self.journal.record(JournalEntry::AdapterDisposed(self.label()));
    }
}

/// Factory that builds a [`MockAdapter`] per folder and remembers each one.
#[derive(Debug, Clone, Default)]
pub struct MockFactory {
    journal: Journal,
    created: Arc<Mutex<Vec<Arc<MockAdapter>>>>,
}

impl MockFactory {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            created: Arc::default(),
        }
    }

    /// Every adapter built so far, in creation order.
    pub fn created(&self) -> Vec<Arc<MockAdapter>> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AdapterFactory<MockAdapter> for MockFactory {
    fn create(&self, folder: &WorkspaceFolder) -> Arc<MockAdapter> {
        let adapter = Arc::new(MockAdapter::new(folder.clone(), self.journal.clone()));
        self.journal
            .record(JournalEntry::AdapterCreated(adapter.label()));
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&adapter));
        adapter
    }
}

/// Hub that tracks which adapter instances are currently registered.
#[derive(Debug, Clone, Default)]
pub struct MockHub {
    journal: Journal,
    registered: Arc<Mutex<Vec<Arc<MockAdapter>>>>,
}

impl MockHub {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            registered: Arc::default(),
        }
    }

    /// Currently registered adapters, in registration order.
    pub fn registered(&self) -> Vec<Arc<MockAdapter>> {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Labels of the currently registered adapters.
    pub fn registered_labels(&self) -> Vec<String> {
        self.registered().iter().map(|a| a.label()).collect()
    }
}

impl AdapterHub<MockAdapter> for MockHub {
    fn register_adapter(&self, adapter: Arc<MockAdapter>) {
        self.journal
            .record(JournalEntry::Registered(adapter.label()));
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(adapter);
    }

    fn unregister_adapter(&self, adapter: &Arc<MockAdapter>) {
        self.journal
            .record(JournalEntry::Unregistered(adapter.label()));
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|a| !Arc::ptr_eq(a, adapter));
    }
}
