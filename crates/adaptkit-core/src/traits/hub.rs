// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared registry that adapters are published to.

use std::sync::Arc;

/// Registry provided by the hosting extension.
///
/// The registrar guarantees that an adapter is unregistered before it is
/// disposed, so a hub never holds a disposed adapter.
pub trait AdapterHub<A: ?Sized>: Send + Sync {
    /// Publish an adapter.
    fn register_adapter(&self, adapter: Arc<A>);

    /// Withdraw a previously published adapter.
    fn unregister_adapter(&self, adapter: &Arc<A>);
}
