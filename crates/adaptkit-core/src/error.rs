// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for AdaptKit.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across AdaptKit crates.
#[derive(Debug, Error)]
pub enum AdaptKitError {
    /// Configuration errors (invalid values, unreadable settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// A log file could not be opened or written.
    #[error("log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A logged value could not be converted to text.
    #[error("could not render value: {0}")]
    Render(String),

    /// An async runtime was required but none is available on this thread.
    #[error("runtime unavailable: {0}")]
    Runtime(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
