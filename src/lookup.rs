// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Dotted-path queries over a JSON document.
//!
//! Paths look like `info.ProductVersion`. A segment that is an unsigned
//! integer also indexes into arrays, and `\.` keeps a literal dot inside a
//! key. Lookups never fail: anything that does not resolve reads as an empty
//! string.

use serde_json::Value;
use tracing::debug;

/// Walk `path` from `root`, returning the value it points at.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    split_path(path)
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Parse `document` and return the value at `path` as a string.
///
/// Malformed JSON and unresolved paths both yield `""`.
pub fn get_string(document: &str, path: &str) -> String {
    let root: Value = match serde_json::from_str(document) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "configuration document is not valid JSON");
            return String::new();
        }
    };

    match get(&root, path) {
        Some(value) => stringify(value),
        None => {
            debug!(path, "path not present in configuration document");
            String::new()
        }
    }
}

/// Render a JSON value the way a version field is expected to read.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}
