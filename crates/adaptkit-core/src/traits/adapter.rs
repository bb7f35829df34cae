// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-folder adapter trait and the factory that builds adapters.

use std::sync::Arc;

use crate::traits::disposable::Disposable;
use crate::types::WorkspaceFolder;

/// An adapter instance bound to a single workspace folder.
///
/// The registrar only needs to release it; everything else the adapter does
/// is between the adapter and the hub it is registered with.
pub trait TestAdapter: Disposable + Send + Sync + 'static {}

impl<T> TestAdapter for T where T: Disposable + Send + Sync + 'static {}

/// Factory trait for creating one adapter per workspace folder.
///
/// Any `Fn(&WorkspaceFolder) -> Arc<A>` closure is a factory.
pub trait AdapterFactory<A: ?Sized>: Send + Sync {
    /// Create the adapter for `folder`.
    fn create(&self, folder: &WorkspaceFolder) -> Arc<A>;
}

impl<A, F> AdapterFactory<A> for F
where
    A: ?Sized,
    F: Fn(&WorkspaceFolder) -> Arc<A> + Send + Sync,
{
    fn create(&self, folder: &WorkspaceFolder) -> Arc<A> {
        self(folder)
    }
}
