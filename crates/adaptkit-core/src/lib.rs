// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for AdaptKit.
//!
//! This crate provides the collaborator traits, event primitives, error type
//! and common types shared by the logger (`adaptkit-log`) and the adapter
//! registrar (`adaptkit-registrar`). Hosts implement the traits defined here.

pub mod error;
pub mod event;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AdaptKitError;
pub use event::{
    AffectedKey, ConfigurationChangeEvent, EventEmitter, Listener, Subscription,
    WorkspaceFoldersChangeEvent,
};
pub use types::{InspectOptions, LogLevel, Uri, WorkspaceFolder, FILE_SCHEME};

pub use traits::{
    AdapterFactory, AdapterHub, Disposable, OutputPanel, TestAdapter, WindowHost, WorkspaceHost,
};
