// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host executable lookup.
//!
//! Asks the platform's own lookup command (`where` on Windows, `which`
//! elsewhere) for the first match on the `PATH`. Lookup failures of any kind
//! yield `None`.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

/// Command used to search the `PATH` on this platform.
pub const LOOKUP_COMMAND: &str = if cfg!(windows) { "where" } else { "which" };

/// Locate `name` on the `PATH`.
///
/// Returns the first non-empty line the lookup command prints, trimmed.
/// Spawn failures, non-zero exits and empty output all yield `None`.
pub async fn detect_executable(name: &str) -> Option<PathBuf> {
    let output = match Command::new(LOOKUP_COMMAND).arg(name).output().await {
        Ok(output) => output,
        Err(e) => {
            debug!(name, command = LOOKUP_COMMAND, error = %e, "lookup command failed to start");
            return None;
        }
    };

    if !output.status.success() {
        debug!(name, status = ?output.status.code(), "executable not found");
        return None;
    }

    let found = first_path(&String::from_utf8_lossy(&output.stdout));
    debug!(name, path = ?found, "executable lookup finished");
    found
}

/// Locate the `node` executable.
pub async fn detect_node_path() -> Option<PathBuf> {
    detect_executable("node").await
}

fn first_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}
