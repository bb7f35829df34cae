// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log line assembly.

use std::borrow::Cow;
use std::fmt;

use adaptkit_core::{InspectOptions, LogLevel};
use chrono::{DateTime, Local};
use tracing::debug;

use crate::inspect::{Inspect, ValueRenderer};

/// Shown in place of a value whose rendering failed.
pub const UNRENDERABLE: &str = "<unrenderable value>";

/// Joiner between two consecutive rendered values.
pub const VALUE_SEPARATOR: &str = " | ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// One argument of a log call.
pub enum LogArg<'a> {
    /// Written verbatim.
    Text(Cow<'a, str>),
    /// Rendered with the effective inspect options, only when the line is written.
    Value(&'a dyn Inspect),
}

impl<'a> LogArg<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        LogArg::Text(text.into())
    }

    pub fn value(value: &'a dyn Inspect) -> Self {
        LogArg::Value(value)
    }

    fn is_value(&self) -> bool {
        matches!(self, LogArg::Value(_))
    }
}

impl<'a> From<&'a str> for LogArg<'a> {
    fn from(text: &'a str) -> Self {
        LogArg::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for LogArg<'a> {
    fn from(text: &'a String) -> Self {
        LogArg::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for LogArg<'_> {
    fn from(text: String) -> Self {
        LogArg::Text(Cow::Owned(text))
    }
}

impl fmt::Debug for LogArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Text(text) => f.debug_tuple("Text").field(text).finish(),
            LogArg::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Local time with millisecond precision and no zone suffix.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Build `[<timestamp>] [<LEVEL>] <parts>`.
pub fn format_line(
    level: LogLevel,
    timestamp: &str,
    args: &[LogArg<'_>],
    renderer: &dyn ValueRenderer,
    options: &InspectOptions,
) -> String {
    let mut line = format!("[{timestamp}] [{level}] ");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            let joiner = if arg.is_value() && args[i - 1].is_value() {
                VALUE_SEPARATOR
            } else {
                " "
            };
            line.push_str(joiner);
        }
        match arg {
            LogArg::Text(text) => line.push_str(text),
            LogArg::Value(value) => match renderer.render(*value, options) {
                Ok(rendered) => line.push_str(&rendered),
                Err(e) => {
                    debug!(error = %e, "value rendering failed");
                    line.push_str(UNRENDERABLE);
                }
            },
        }
    }
    line
}
