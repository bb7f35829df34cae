// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of non-text log values.
//!
//! Values are captured through `serde` ([`Inspect`]) and turned into text by
//! a [`ValueRenderer`]. The default [`StructuralRenderer`] prints the value
//! tree in a compact, JavaScript-like notation and honours the limits in
//! [`InspectOptions`].

use std::fmt::Write as _;

use adaptkit_core::{AdaptKitError, InspectOptions};
use serde::Serialize;
use serde_json::{Map, Value};

/// A value that can be captured as a structural tree for rendering.
///
/// Implemented for everything that implements [`Serialize`]. Capturing only
/// happens when a log line is actually going to be written.
pub trait Inspect {
    fn inspect(&self) -> Result<Value, AdaptKitError>;
}

impl<T: Serialize + ?Sized> Inspect for T {
    fn inspect(&self) -> Result<Value, AdaptKitError> {
        serde_json::to_value(self).map_err(|e| AdaptKitError::Render(e.to_string()))
    }
}

/// Converts a logged value into text.
pub trait ValueRenderer: Send + Sync {
    fn render(&self, value: &dyn Inspect, options: &InspectOptions) -> Result<String, AdaptKitError>;
}

/// Default renderer: a structural pretty-printer with depth and length limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralRenderer;

impl ValueRenderer for StructuralRenderer {
    fn render(&self, value: &dyn Inspect, options: &InspectOptions) -> Result<String, AdaptKitError> {
        let tree = value.inspect()?;
        Ok(render_value(&tree, options))
    }
}

/// Render an already captured value tree.
pub fn render_value(value: &Value, options: &InspectOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, options, 0);
    out
}

const INDENT: &str = "  ";

fn write_value(out: &mut String, value: &Value, options: &InspectOptions, level: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => write_string(out, s, options.max_string_length()),
        Value::Array(items) => {
            if level > options.depth() {
                out.push_str("[Array]");
                return;
            }
            let shown = items.len().min(options.max_array_length());
            let mut entries: Vec<String> = items[..shown]
                .iter()
                .map(|item| {
                    let mut entry = String::new();
                    write_value(&mut entry, item, options, level + 1);
                    entry
                })
                .collect();
            if items.len() > shown {
                entries.push(more_items(items.len() - shown));
            }
            write_container(out, '[', ']', &entries, options, level);
        }
        Value::Object(map) => {
            if level > options.depth() {
                out.push_str("[Object]");
                return;
            }
            let entries = object_entries(map, options, level);
            write_container(out, '{', '}', &entries, options, level);
        }
    }
}

fn object_entries(map: &Map<String, Value>, options: &InspectOptions, level: usize) -> Vec<String> {
    let mut keys: Vec<&String> = map.keys().collect();
    if options.sort_keys() {
        keys.sort();
    }

    let shown = keys.len().min(options.max_array_length());
    let mut entries: Vec<String> = keys[..shown]
        .iter()
        .map(|key| {
            let mut entry = String::new();
            write_key(&mut entry, key);
            entry.push_str(": ");
            write_value(&mut entry, &map[key.as_str()], options, level + 1);
            entry
        })
        .collect();
    if keys.len() > shown {
        entries.push(more_items(keys.len() - shown));
    }
    entries
}

fn write_container(
    out: &mut String,
    open: char,
    close: char,
    entries: &[String],
    options: &InspectOptions,
    level: usize,
) {
    if entries.is_empty() {
        out.push(open);
        out.push(close);
        return;
    }

    if options.pretty() {
        let inner = INDENT.repeat(level + 1);
        out.push(open);
        out.push('\n');
        for (i, entry) in entries.iter().enumerate() {
            out.push_str(&inner);
            out.push_str(entry);
            if i + 1 < entries.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&INDENT.repeat(level));
        out.push(close);
    } else {
        out.push(open);
        out.push(' ');
        out.push_str(&entries.join(", "));
        out.push(' ');
        out.push(close);
    }
}

fn write_key(out: &mut String, key: &str) {
    let is_identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn write_string(out: &mut String, s: &str, max_chars: usize) {
    let total = s.chars().count();
    if total <= max_chars {
        write_quoted(out, s);
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        write_quoted(out, &truncated);
        let _ = write!(out, "... {} more character{}", total - max_chars, plural(total - max_chars));
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn more_items(count: usize) -> String {
    format!("... {count} more item{}", plural(count))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
