// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-folder adapter registrar.
//!
//! Binds one adapter instance to each open `file` workspace folder and keeps
//! the extension's adapter hub in sync as folders are added or removed.

pub mod registrar;

pub use registrar::AdapterRegistrar;
