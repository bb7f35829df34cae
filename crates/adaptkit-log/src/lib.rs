// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configurable multi-target logger.
//!
//! A [`Log`] fans formatted lines out to an output panel and/or an
//! append-only file, following the `<section>.logpanel` and
//! `<section>.logfile` settings of its workspace host and rebuilding its
//! targets whenever those settings change.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use adaptkit_core::{WindowHost, WorkspaceHost};
//! # fn demo(workspace: Arc<dyn WorkspaceHost>, window: Arc<dyn WindowHost>) {
//! use adaptkit_log::{Log, LogArg};
//!
//! let log = Log::new("testExplorer", None, "Test Explorer Log", workspace, window);
//! let ids = vec![1, 2, 3];
//! log.info(&["Loaded".into(), LogArg::value(&ids)]);
//! # }
//! ```

pub mod file;
pub mod format;
pub mod inspect;
pub mod log;
pub mod target;

pub use file::FileTarget;
pub use format::{format_line, timestamp, LogArg, UNRENDERABLE, VALUE_SEPARATOR};
pub use inspect::{render_value, Inspect, StructuralRenderer, ValueRenderer};
pub use log::{Log, LogBuilder, LOGFILE_KEY, LOGPANEL_KEY};
pub use target::{LogTarget, PanelTarget, TargetKind};
