// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for AdaptKit.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at load time, providing actionable error messages.

use std::collections::BTreeMap;

use adaptkit_core::{InspectOptions, Uri};
use serde::{Deserialize, Serialize};

/// Key enabling the output-panel log target.
pub const LOGPANEL_KEY: &str = "logpanel";

/// Key holding the log file path.
pub const LOGFILE_KEY: &str = "logfile";

/// Every per-section key the logger reads.
pub const SECTION_KEYS: [&str; 2] = [LOGPANEL_KEY, LOGFILE_KEY];

/// Tables allowed at the top level of a config file.
pub const TOP_LEVEL_KEYS: [&str; 3] = ["log", "sections", "folders"];

/// Keys of the `[log]` table.
pub const LOG_KEYS: [&str; 3] = ["section", "output_name", "inspect"];

/// Keys of the `[log.inspect]` table.
pub const INSPECT_KEYS: [&str; 5] = [
    "depth",
    "max_array_length",
    "max_string_length",
    "pretty",
    "sort_keys",
];

/// Keys of a `[folders."<path>"]` table.
pub const FOLDER_KEYS: [&str; 1] = ["sections"];

/// Top-level AdaptKit configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdaptKitConfig {
    /// Logger identity and formatting defaults.
    #[serde(default)]
    pub log: LogConfig,

    /// Settings per configuration section, applying to every scope.
    #[serde(default)]
    pub sections: BTreeMap<String, SectionSettings>,

    /// Folder-scoped overrides, keyed by folder path or URI.
    #[serde(default)]
    pub folders: BTreeMap<String, FolderSettings>,
}

/// Logger identity and formatting configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Configuration section the logger reads `logpanel`/`logfile` from.
    #[serde(default = "default_section")]
    pub section: String,

    /// Name of the output panel created when `logpanel` is enabled.
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Default rendering options for logged values.
    #[serde(default)]
    pub inspect: InspectOptions,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            section: default_section(),
            output_name: default_output_name(),
            inspect: InspectOptions::default(),
        }
    }
}

fn default_section() -> String {
    "adaptkit".to_string()
}

fn default_output_name() -> String {
    "AdaptKit Log".to_string()
}

/// Logger settings of one configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSettings {
    /// Write log lines to an output panel.
    #[serde(default)]
    pub logpanel: Option<bool>,

    /// Append log lines to this file. Empty disables the file target.
    #[serde(default)]
    pub logfile: Option<String>,
}

impl SectionSettings {
    /// Value of `key` as a JSON value, `None` when unset or unknown.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match key {
            LOGPANEL_KEY => self.logpanel.map(serde_json::Value::Bool),
            LOGFILE_KEY => self.logfile.clone().map(serde_json::Value::String),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.logpanel.is_none() && self.logfile.is_none()
    }
}

/// Overrides for a single workspace folder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolderSettings {
    #[serde(default)]
    pub sections: BTreeMap<String, SectionSettings>,
}

impl AdaptKitConfig {
    /// The global (unscoped) settings of `section`.
    pub fn section(&self, section: &str) -> Option<&SectionSettings> {
        self.sections.get(section)
    }

    /// The folder settings whose key denotes `scope`.
    pub fn folder(&self, scope: &Uri) -> Option<&FolderSettings> {
        self.folders
            .iter()
            .find(|(key, _)| folder_key_matches(key, scope))
            .map(|(_, settings)| settings)
    }

    /// Resolve `<section>.<key>` for `scope`: the folder value wins over the global one.
    pub fn value(&self, section: &str, key: &str, scope: Option<&Uri>) -> Option<serde_json::Value> {
        let scoped = scope
            .and_then(|scope| self.folder(scope))
            .and_then(|folder| folder.sections.get(section))
            .and_then(|settings| settings.get(key));
        scoped.or_else(|| self.section(section).and_then(|settings| settings.get(key)))
    }
}

/// Map key used to store overrides for `scope`.
pub fn folder_key(scope: &Uri) -> String {
    match scope.fs_path() {
        Some(path) => path.display().to_string(),
        None => scope.to_string(),
    }
}

fn folder_key_matches(key: &str, scope: &Uri) -> bool {
    key.parse::<Uri>().is_ok_and(|uri| &uri == scope)
}
