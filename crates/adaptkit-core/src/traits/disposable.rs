// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit resource release.

/// A resource released by an explicit call rather than by scope.
///
/// Implementations must tolerate repeated calls.
pub trait Disposable {
    /// Release the resource.
    fn dispose(&self);
}
