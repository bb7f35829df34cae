// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./adaptkit.toml` > `~/.config/adaptkit/adaptkit.toml` > `/etc/adaptkit/adaptkit.toml`
//! with environment variable overrides via `ADAPTKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AdaptKitConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/adaptkit/adaptkit.toml";

/// Configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "adaptkit.toml";

/// User configuration file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("adaptkit").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/adaptkit/adaptkit.toml` (system-wide)
/// 3. `~/.config/adaptkit/adaptkit.toml` (user XDG config)
/// 4. `./adaptkit.toml` (local directory)
/// 5. `ADAPTKIT_*` environment variables
pub fn load_config() -> Result<AdaptKitConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AdaptKitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AdaptKitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AdaptKitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AdaptKitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AdaptKitConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ADAPTKIT_LOG_OUTPUT_NAME` must map to `log.output_name`,
/// not `log.output.name`.
fn env_provider() -> Env {
    Env::prefixed("ADAPTKIT_").map(|key| {
        // `key` keeps the env var's case with the prefix stripped.
        // Example: ADAPTKIT_LOG_INSPECT_DEPTH -> "log.inspect.depth"
        key.as_str()
            .to_ascii_lowercase()
            .replacen("log_", "log.", 1)
            .replacen("inspect_", "inspect.", 1)
            .into()
    })
}
