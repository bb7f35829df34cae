// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous event emitters with explicit subscription objects.
//!
//! A listener stays attached until its [`Subscription`] is disposed (or
//! dropped). Listeners run on the thread that calls [`EventEmitter::fire`],
//! in subscription order. The listener list is snapshotted before dispatch,
//! so listeners may subscribe or unsubscribe while an event is in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::traits::disposable::Disposable;
use crate::types::{Uri, WorkspaceFolder};

/// A callback attached to an [`EventEmitter`].
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

type ListenerList<T> = Mutex<Vec<(u64, Listener<T>)>>;

/// Source of events of type `T`.
pub struct EventEmitter<T> {
    listeners: Arc<ListenerList<T>>,
    next_id: AtomicU64,
}

impl<T: 'static> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Attach a listener. The returned subscription detaches it.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.subscribe_arc(Arc::new(listener))
    }

    /// Attach an already shared listener.
    pub fn subscribe_arc(&self, listener: Listener<T>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        let weak: Weak<ListenerList<T>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Deliver `event` to every attached listener.
    pub fn fire(&self, event: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by event sources; disposing it detaches the listener.
///
/// Disposal is idempotent. Dropping a subscription disposes it.
pub struct Subscription {
    release: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Mutex::new(Some(Box::new(release))),
        }
    }

    /// A subscription that holds nothing.
    pub fn empty() -> Self {
        Self {
            release: Mutex::new(None),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        let release = self
            .release
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(release) = release {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// One configuration key touched by a change, optionally limited to a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedKey {
    /// Fully qualified key, e.g. `testExplorer.logfile`.
    pub key: String,
    /// Folder the change applies to; `None` means every scope.
    pub scope: Option<Uri>,
}

/// Notification that configuration values changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationChangeEvent {
    pub affected: Vec<AffectedKey>,
}

impl ConfigurationChangeEvent {
    pub fn new(affected: Vec<AffectedKey>) -> Self {
        Self { affected }
    }

    /// A change to `key` in every scope.
    pub fn global(key: impl Into<String>) -> Self {
        Self::new(vec![AffectedKey {
            key: key.into(),
            scope: None,
        }])
    }

    /// A change to `key` in a single folder scope.
    pub fn scoped(key: impl Into<String>, scope: Uri) -> Self {
        Self::new(vec![AffectedKey {
            key: key.into(),
            scope: Some(scope),
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.affected.is_empty()
    }

    /// Whether the change touches `key` (or a parent/child of it) as seen from `scope`.
    ///
    /// An unscoped query or an unscoped change matches every scope.
    pub fn affects_configuration(&self, key: &str, scope: Option<&Uri>) -> bool {
        self.affected.iter().any(|changed| {
            let key_matches = changed.key == key
                || is_child_key(&changed.key, key)
                || is_child_key(key, &changed.key);
            let scope_matches = match (&changed.scope, scope) {
                (Some(changed_scope), Some(scope)) => changed_scope == scope,
                _ => true,
            };
            key_matches && scope_matches
        })
    }
}

fn is_child_key(child: &str, parent: &str) -> bool {
    child
        .strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// Workspace folders added to and removed from the workspace in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceFoldersChangeEvent {
    pub added: Vec<WorkspaceFolder>,
    pub removed: Vec<WorkspaceFolder>,
}
