// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the logger, the registrar and the host traits.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::AdaptKitError;

/// Scheme used by folders that live on the local file system.
pub const FILE_SCHEME: &str = "file";

/// Location of a workspace resource: a scheme plus a scheme-specific path.
///
/// Only `file` locations map onto the local file system; everything else
/// (remote, virtual, untitled) is opaque to AdaptKit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uri {
    pub scheme: String,
    pub path: String,
}

impl Uri {
    /// Build a `file` URI from a local path.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            scheme: FILE_SCHEME.to_string(),
            path: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// Returns true if this URI points at the local file system.
    pub fn is_file(&self) -> bool {
        self.scheme == FILE_SCHEME
    }

    /// Returns the local path for `file` URIs.
    pub fn fs_path(&self) -> Option<PathBuf> {
        self.is_file().then(|| PathBuf::from(&self.path))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

impl FromStr for Uri {
    type Err = AdaptKitError;

    /// Parses `scheme://path`. A string without a scheme is a local path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("://") {
            Some((scheme, path)) => {
                let valid_scheme = !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
                if !valid_scheme {
                    return Err(AdaptKitError::Config(format!("invalid URI scheme in `{s}`")));
                }
                Ok(Self::new(scheme.to_ascii_lowercase(), path))
            }
            None if s.is_empty() => Err(AdaptKitError::Config("empty URI".to_string())),
            None => Ok(Self::file(s)),
        }
    }
}

/// A folder opened in the editor workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    /// Location of the folder; also its identity.
    pub uri: Uri,
    /// Display name, usually the last path segment.
    pub name: String,
    /// Position of the folder in the workspace.
    pub index: usize,
}

impl WorkspaceFolder {
    pub fn new(uri: Uri, index: usize) -> Self {
        let name = uri
            .path
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&uri.path)
            .to_string();
        Self { uri, name, index }
    }

    /// Shorthand for a local folder.
    pub fn local(path: impl AsRef<Path>, index: usize) -> Self {
        Self::new(Uri::file(path), index)
    }

    /// Path used in log lines: the local path for `file` folders, the full URI otherwise.
    pub fn display_path(&self) -> String {
        match self.uri.fs_path() {
            Some(path) => path.display().to_string(),
            None => self.uri.to_string(),
        }
    }
}

/// Severity tag written into every log line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Options controlling how non-text log values are rendered.
///
/// Every field is optional so that records can be shallow-merged; unset
/// fields fall back to the `DEFAULT_*` constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectOptions {
    /// How many levels of nested arrays/objects to descend into.
    #[serde(default)]
    pub depth: Option<usize>,
    /// Maximum number of array elements (and object entries) shown.
    #[serde(default)]
    pub max_array_length: Option<usize>,
    /// Maximum number of characters shown per string.
    #[serde(default)]
    pub max_string_length: Option<usize>,
    /// Multi-line, indented output instead of a single line.
    #[serde(default)]
    pub pretty: Option<bool>,
    /// Sort object keys alphabetically.
    #[serde(default)]
    pub sort_keys: Option<bool>,
}

impl InspectOptions {
    pub const DEFAULT_DEPTH: usize = 2;
    pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 100;
    pub const DEFAULT_MAX_STRING_LENGTH: usize = 10_000;

    /// Shallow merge: fields set in `other` win, unset fields keep `self`'s value.
    pub fn merged(&self, other: &InspectOptions) -> InspectOptions {
        InspectOptions {
            depth: other.depth.or(self.depth),
            max_array_length: other.max_array_length.or(self.max_array_length),
            max_string_length: other.max_string_length.or(self.max_string_length),
            pretty: other.pretty.or(self.pretty),
            sort_keys: other.sort_keys.or(self.sort_keys),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth.unwrap_or(Self::DEFAULT_DEPTH)
    }

    pub fn max_array_length(&self) -> usize {
        self.max_array_length.unwrap_or(Self::DEFAULT_MAX_ARRAY_LENGTH)
    }

    pub fn max_string_length(&self) -> usize {
        self.max_string_length.unwrap_or(Self::DEFAULT_MAX_STRING_LENGTH)
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }

    pub fn sort_keys(&self) -> bool {
        self.sort_keys.unwrap_or(false)
    }
}
