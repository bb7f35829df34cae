// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the boundary between AdaptKit and its host.
//!
//! Hosts implement [`WorkspaceHost`], [`WindowHost`] and [`AdapterHub`];
//! extensions supply adapters ([`TestAdapter`]) through an [`AdapterFactory`].

pub mod adapter;
pub mod disposable;
pub mod hub;
pub mod window;
pub mod workspace;

pub use adapter::{AdapterFactory, TestAdapter};
pub use disposable::Disposable;
pub use hub::AdapterHub;
pub use window::{OutputPanel, WindowHost};
pub use workspace::WorkspaceHost;
