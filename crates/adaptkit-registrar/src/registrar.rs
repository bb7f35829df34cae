// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folder-to-adapter registrar.
//!
//! The `AdapterRegistrar` stores one adapter per open `file` workspace folder,
//! keyed by the folder URI. Adapters are created through an
//! [`AdapterFactory`], published to an [`AdapterHub`], and unregistered then
//! disposed when their folder goes away.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use adaptkit_core::{
    AdapterFactory, AdapterHub, Disposable, Subscription, TestAdapter, Uri, WorkspaceFolder,
    WorkspaceFoldersChangeEvent, WorkspaceHost,
};
use adaptkit_log::Log;
use tracing::debug;

/// A stored adapter together with the folder it serves.
struct Registration<A: ?Sized> {
    folder: WorkspaceFolder,
    adapter: Arc<A>,
}

/// Keeps the hub's adapters in step with the workspace folders.
pub struct AdapterRegistrar<A: TestAdapter + ?Sized> {
    inner: Arc<RegistrarInner<A>>,
}

struct RegistrarInner<A: TestAdapter + ?Sized> {
    hub: Arc<dyn AdapterHub<A>>,
    factory: Arc<dyn AdapterFactory<A>>,
    log: Log,
    adapters: Mutex<HashMap<Uri, Registration<A>>>,
    subscription: Mutex<Option<Subscription>>,
    disposed: AtomicBool,
}

impl<A: TestAdapter + ?Sized> AdapterRegistrar<A> {
    /// Register adapters for every open folder and start following folder
    /// changes.
    pub fn new(
        workspace: Arc<dyn WorkspaceHost>,
        hub: Arc<dyn AdapterHub<A>>,
        factory: impl AdapterFactory<A> + 'static,
        log: Log,
    ) -> Self {
        let inner = Arc::new(RegistrarInner {
            hub,
            factory: Arc::new(factory),
            log,
            adapters: Mutex::new(HashMap::new()),
            subscription: Mutex::new(None),
            disposed: AtomicBool::new(false),
        });

        for folder in workspace.workspace_folders() {
            inner.add(&folder);
        }
        inner.log.info(&["Initialization finished".into()]);

        let weak: Weak<RegistrarInner<A>> = Arc::downgrade(&inner);
        let subscription = workspace.on_did_change_workspace_folders(Box::new(
            move |event: &WorkspaceFoldersChangeEvent| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_folders_changed(event);
                }
            },
        ));
        *inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        debug!(adapters = inner.len(), "adapter registrar started");
        Self { inner }
    }

    /// Create, store and register the adapter for `folder`.
    ///
    /// Folders whose URI scheme is not `file` are skipped. A folder that
    /// already has an adapter has it removed first.
    pub fn add(&self, folder: &WorkspaceFolder) {
        self.inner.add(folder);
    }

    /// Unregister and dispose the adapter for `folder`, if any.
    pub fn remove(&self, folder: &WorkspaceFolder) {
        self.inner.remove(folder);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, uri: &Uri) -> bool {
        self.inner.lock_adapters().contains_key(uri)
    }

    /// The adapter currently stored for `uri`.
    pub fn adapter(&self, uri: &Uri) -> Option<Arc<A>> {
        self.inner
            .lock_adapters()
            .get(uri)
            .map(|r| Arc::clone(&r.adapter))
    }

    /// Folders that currently have an adapter, in workspace order.
    pub fn folders(&self) -> Vec<WorkspaceFolder> {
        let mut folders: Vec<WorkspaceFolder> = self
            .inner
            .lock_adapters()
            .values()
            .map(|r| r.folder.clone())
            .collect();
        folders.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.uri.cmp(&b.uri)));
        folders
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl<A: TestAdapter + ?Sized> Disposable for AdapterRegistrar<A> {
    /// Remove every adapter, dispose the log and stop following folder
    /// changes. Idempotent.
    fn dispose(&self) {
        self.inner.dispose();
    }
}

impl<A: TestAdapter + ?Sized> std::fmt::Debug for AdapterRegistrar<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistrar")
            .field("folders", &self.folders())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl<A: TestAdapter + ?Sized> RegistrarInner<A> {
    fn lock_adapters(&self) -> MutexGuard<'_, HashMap<Uri, Registration<A>>> {
        self.adapters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn len(&self) -> usize {
        self.lock_adapters().len()
    }

    fn on_folders_changed(&self, event: &WorkspaceFoldersChangeEvent) {
        debug!(
            added = event.added.len(),
            removed = event.removed.len(),
            "workspace folders changed"
        );
        for folder in &event.removed {
            self.remove(folder);
        }
        for folder in &event.added {
            self.add(folder);
        }
    }

    fn add(&self, folder: &WorkspaceFolder) {
        if self.disposed.load(Ordering::Acquire) {
            debug!(folder = %folder.uri, "registrar disposed, folder ignored");
            return;
        }

        if !folder.uri.is_file() {
            self.log.info(&[
                "Skipping folder".into(),
                folder.uri.to_string().into(),
                "with scheme".into(),
                folder.uri.scheme.as_str().into(),
            ]);
            return;
        }

        if self.lock_adapters().contains_key(&folder.uri) {
            debug!(folder = %folder.uri, "folder already has an adapter, replacing it");
            self.remove(folder);
        }

        let path = folder.display_path();
        self.log
            .info(&["Creating adapter for".into(), path.as_str().into()]);
        let adapter = self.factory.create(folder);

        let displaced = self.lock_adapters().insert(
            folder.uri.clone(),
            Registration {
                folder: folder.clone(),
                adapter: Arc::clone(&adapter),
            },
        );
        if let Some(displaced) = displaced {
            self.release(displaced);
        }

        self.log
            .info(&["Registering adapter for".into(), path.as_str().into()]);
        self.hub.register_adapter(adapter);
    }

    fn remove(&self, folder: &WorkspaceFolder) {
        let Some(registration) = self.lock_adapters().remove(&folder.uri) else {
            return;
        };
        self.log.info(&[
            "Removing adapter for".into(),
            registration.folder.display_path().into(),
        ]);
        self.release(registration);
    }

    /// Unregister strictly before disposing.
    fn release(&self, registration: Registration<A>) {
        self.hub.unregister_adapter(&registration.adapter);
        registration.adapter.dispose();
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.dispose();
        }

        let mut folders: Vec<WorkspaceFolder> = self
            .lock_adapters()
            .values()
            .map(|r| r.folder.clone())
            .collect();
        folders.sort_by_key(|f| f.index);
        for folder in &folders {
            self.remove(folder);
        }

        self.log.dispose();
        debug!(removed = folders.len(), "adapter registrar disposed");
    }
}

impl<A: TestAdapter + ?Sized> Drop for RegistrarInner<A> {
    fn drop(&mut self) {
        self.dispose();
    }
}
