// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `adaptkit locate` command.

use std::process::ExitCode;

/// Print the path of `name`, or fail with exit status 1 when it is not on the `PATH`.
pub async fn run_locate(name: &str) -> ExitCode {
    match adaptkit_locate::detect_executable(name).await {
        Some(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("adaptkit: `{name}` was not found on the PATH");
            ExitCode::FAILURE
        }
    }
}
