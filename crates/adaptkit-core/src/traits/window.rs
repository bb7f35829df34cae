// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing surfaces of the editor window.

use std::sync::Arc;

use crate::traits::disposable::Disposable;

/// A named, append-only text panel. The panel owns line separation.
pub trait OutputPanel: Disposable + Send + Sync {
    fn append_line(&self, line: &str);
}

/// Window-level services used by the logger.
pub trait WindowHost: Send + Sync {
    /// Acquire (or create) the output panel called `name`.
    fn create_output_panel(&self, name: &str) -> Arc<dyn OutputPanel>;

    /// Show a non-fatal error notification to the user.
    fn show_error_message(&self, message: &str);
}
