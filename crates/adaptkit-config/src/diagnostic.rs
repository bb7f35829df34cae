// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment reports failures against a key path such as
//! `folders./work/a.sections.ext.logpanle`. This module maps that path back
//! onto the AdaptKit table it belongs to ([`Table`]), so that unknown keys
//! get suggestions from the keys that table actually accepts and bad values
//! get a description of what the logger expects there.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

use crate::model::{
    FOLDER_KEYS, INSPECT_KEYS, LOGFILE_KEY, LOGPANEL_KEY, LOG_KEYS, SECTION_KEYS, TOP_LEVEL_KEYS,
};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The table of an AdaptKit config file a key lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    Root,
    Log,
    Inspect,
    /// `[sections.<name>]`
    Section { name: String },
    /// `[folders."<folder>"]`
    Folder { folder: String },
    /// `[folders."<folder>".sections.<name>]`
    FolderSection { folder: String, name: String },
    /// Anything else, by key path.
    Other(Vec<String>),
}

impl Table {
    /// Classify the key path of the table (without the offending key).
    pub fn from_path(path: &[String]) -> Self {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        match path.as_slice() {
            [] => Table::Root,
            ["log"] => Table::Log,
            ["log", "inspect"] => Table::Inspect,
            ["sections", name] => Table::Section {
                name: (*name).to_string(),
            },
            ["folders", folder] => Table::Folder {
                folder: (*folder).to_string(),
            },
            ["folders", folder, "sections", name] => Table::FolderSection {
                folder: (*folder).to_string(),
                name: (*name).to_string(),
            },
            _ => Table::Other(path.iter().map(|s| (*s).to_string()).collect()),
        }
    }

    /// Keys this table accepts, when it is one AdaptKit defines.
    pub fn known_keys(&self) -> Option<&'static [&'static str]> {
        match self {
            Table::Root => Some(&TOP_LEVEL_KEYS),
            Table::Log => Some(&LOG_KEYS),
            Table::Inspect => Some(&INSPECT_KEYS),
            Table::Section { .. } | Table::FolderSection { .. } => Some(&SECTION_KEYS),
            Table::Folder { .. } => Some(&FOLDER_KEYS),
            Table::Other(_) => None,
        }
    }

    fn is_section(&self) -> bool {
        matches!(self, Table::Section { .. } | Table::FolderSection { .. })
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Table::Root => Vec::new(),
            Table::Log => vec!["log"],
            Table::Inspect => vec!["log", "inspect"],
            Table::Section { name } => vec!["sections", name],
            Table::Folder { folder } => vec!["folders", folder],
            Table::FolderSection { folder, name } => vec!["folders", folder, "sections", name],
            Table::Other(path) => path.iter().map(String::as_str).collect(),
        }
    }

    /// Dotted key of `key` inside this table.
    pub fn key_path(&self, key: &str) -> String {
        let mut segments = self.segments();
        segments.push(key);
        segments.join(".")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Root => f.write_str("the top level"),
            Table::Log => f.write_str("[log]"),
            Table::Inspect => f.write_str("[log.inspect]"),
            Table::Section { name } => write!(f, "[sections.{name}]"),
            Table::Folder { folder } => write!(f, "[folders.\"{folder}\"]"),
            Table::FolderSection { folder, name } => {
                write!(f, "[folders.\"{folder}\".sections.{name}]")
            }
            Table::Other(path) => write!(f, "[{}]", path.join(".")),
        }
    }
}

/// A configuration error, renderable by miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {table}")]
    #[diagnostic(
        code(adaptkit::config::unknown_key),
        help("{}", unknown_key_help(key, table, suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        table: Table,
        suggestion: Option<String>,
        /// Comma-separated keys the table accepts.
        valid_keys: String,
        #[label("not a key of this table")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(adaptkit::config::invalid_value), help("expected {expected}"))]
    InvalidValue {
        /// Full dotted key, e.g. `sections.ext.logpanel`.
        key: String,
        detail: String,
        expected: String,
        #[label("invalid value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("config file {} does not exist", path.display())]
    #[diagnostic(
        code(adaptkit::config::missing_file),
        help("pass an existing file to --config, or omit it to use ./adaptkit.toml and the XDG config")
    )]
    MissingFile { path: PathBuf },

    #[error("validation error: {message}")]
    #[diagnostic(code(adaptkit::config::validation))]
    Validation { message: String },

    /// Unreadable files, TOML syntax errors and anything else figment reports.
    #[error("could not load configuration: {0}")]
    #[diagnostic(code(adaptkit::config::load))]
    Load(String),
}

fn unknown_key_help(key: &str, table: &Table, suggestion: Option<&str>, valid_keys: &str) -> String {
    let mut help = match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    };
    if !table.is_section() && SECTION_KEYS.contains(&key) {
        help.push_str(&format!(
            "; `{key}` is set per section, under [sections.<name>] or [folders.\"<path>\".sections.<name>]"
        ));
    }
    help
}

/// What a value at `key` in `table` must look like, falling back to serde's wording.
fn expected_value(table: &Table, key: &str, fallback: &str) -> String {
    match (table, key) {
        (t, LOGPANEL_KEY) if t.is_section() => "a boolean (`true` or `false`)".to_string(),
        (t, LOGFILE_KEY) if t.is_section() => {
            "a file path string (an empty string disables the file)".to_string()
        }
        (Table::Log, "section" | "output_name") => "a string".to_string(),
        (Table::Inspect, "pretty" | "sort_keys") => "a boolean (`true` or `false`)".to_string(),
        (Table::Inspect, "depth" | "max_array_length" | "max_string_length") => {
            "a non-negative integer".to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Convert a `figment::Error` into one [`ConfigError`] per reported failure.
///
/// `toml_sources` holds `(path, content)` pairs used to point at the
/// offending line.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path = error.path.clone();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    // The reported path ends with the unknown key itself.
                    let parent = match path.split_last() {
                        Some((last, parent)) if last == field => parent,
                        _ => &path[..],
                    };
                    let table = Table::from_path(parent);
                    let valid: Vec<&str> = match table.known_keys() {
                        Some(keys) => keys.to_vec(),
                        None => expected.to_vec(),
                    };
                    let (span, src) = locate(&error, &table, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, &valid),
                        valid_keys: valid.join(", "),
                        table,
                        span,
                        src,
                    }
                }
                Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
                    let (table, key) = match path.split_last() {
                        Some((key, parent)) => (Table::from_path(parent), key.clone()),
                        None => (Table::Root, String::new()),
                    };
                    let (span, src) = locate(&error, &table, &key, toml_sources);
                    ConfigError::InvalidValue {
                        key: table.key_path(&key),
                        detail: format!("found {actual}"),
                        expected: expected_value(&table, &key, expected),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Load(error.to_string()),
            }
        })
        .collect()
}

/// Source span of `key` in the file the error came from, if it can be found.
fn locate(
    error: &figment::error::Error,
    table: &Table,
    key: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });
    let Some((name, content)) = file.and_then(|file| toml_sources.iter().find(|(p, _)| *p == file))
    else {
        return (None, None);
    };

    match find_key_offset(content, table, key) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), key.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `key = ...` inside the body of `table` in `content`.
///
/// Root keys are searched before the first table header. Header matching
/// ignores whitespace and quoting, so `[folders."/work/a".sections.ext]`
/// matches the table for folder `/work/a`, section `ext`.
pub fn find_key_offset(content: &str, table: &Table, key: &str) -> Option<usize> {
    let wanted = format!("[{}]", table.segments().join("."));
    let mut in_table = matches!(table, Table::Root);
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_table = normalize_header(trimmed) == wanted;
        } else if in_table
            && let Some(after) = trimmed.strip_prefix(key)
            && after.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    None
}

fn normalize_header(line: &str) -> String {
    let header = line.split('#').next().unwrap_or(line);
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect()
}

/// Best-matching valid key for a misspelled one.
///
/// A case-insensitive exact match wins (`logPanel` -> `logpanel`); otherwise
/// the closest key by Jaro-Winkler similarity above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    if let Some(key) = valid_keys.iter().find(|k| k.eq_ignore_ascii_case(unknown)) {
        return Some((*key).to_string());
    }

    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Render every error as a miette report, one after another.
pub fn render_report(errors: &[ConfigError]) -> String {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        let mut buf = String::new();
        if handler.render_report(&mut buf, error as &dyn Diagnostic).is_ok() {
            out.push_str(&buf);
        } else {
            out.push_str(&format!("Error: {error}\n"));
        }
    }
    if errors.len() > 1 {
        out.push_str(&format!("{} configuration errors\n", errors.len()));
    }
    out
}

/// Print [`render_report`] to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_report(errors));
}
