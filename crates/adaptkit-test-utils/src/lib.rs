// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for AdaptKit integration tests.
//!
//! Provides recording mock hosts so logger and registrar behaviour can be
//! asserted without an editor.
//!
//! # Components
//!
//! - [`Journal`] - Ordered record shared by every mock built from it
//! - [`MockWindow`] - Window host with recording output panels
//! - [`MockWorkspace`] - Workspace host over a [`SettingsStore`](adaptkit_config::SettingsStore)
//! - [`MockFactory`], [`MockHub`], [`MockAdapter`] - Adapter lifecycle doubles

pub mod journal;
pub mod mock_adapter;
pub mod mock_window;
pub mod mock_workspace;

pub use journal::{Journal, JournalEntry};
pub use mock_adapter::{MockAdapter, MockFactory, MockHub};
pub use mock_window::{MockPanel, MockWindow};
pub use mock_workspace::MockWorkspace;
