use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::{
    core::element::{CodebaseMap, Element},
    issues::Diagnostic,
};

const TEMPLATE_KEY: &str = "template-to-follow";
const ELEMENTS_KEY: &str = "elements";

/// The persisted map as found at the start of a run.
#[derive(Debug)]
pub struct LoadedMap {
    pub map: CodebaseMap,
    /// False when the file was absent.
    pub existed: bool,
    /// Problems found while decoding the file.
    pub diagnostics: Vec<Diagnostic>,
}

/// Load the persisted map at `path`.
///
/// A missing file yields an empty map. A file that is not valid JSON, or
/// whose top level is not an object, yields an empty map with a
/// `CorruptMap` diagnostic. Otherwise elements are decoded one by one:
/// ill-typed fields fall back to their defaults and only entries without a
/// string `name` are dropped, each with a `MalformedEntry` diagnostic.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read.
pub fn load_map(path: &Path, display_name: &str) -> Result<LoadedMap> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(LoadedMap {
                map: CodebaseMap::default(),
                existed: false,
                diagnostics: Vec::new(),
            });
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read map file: {}", path.display()));
        }
    };

    let fields = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            return Ok(corrupt(
                display_name,
                format!("expected a JSON object, found {}", json_kind(&other)),
            ));
        }
        Err(err) => return Ok(corrupt(display_name, err.to_string())),
    };

    let (map, diagnostics) = decode_map(fields, display_name);
    Ok(LoadedMap {
        map,
        existed: true,
        diagnostics,
    })
}

fn corrupt(display_name: &str, reason: String) -> LoadedMap {
    LoadedMap {
        map: CodebaseMap::default(),
        existed: true,
        diagnostics: vec![Diagnostic::CorruptMap {
            file: display_name.to_string(),
            reason,
        }],
    }
}

fn decode_map(
    mut fields: Map<String, Value>,
    display_name: &str,
) -> (CodebaseMap, Vec<Diagnostic>) {
    let mut map = CodebaseMap::default();
    let mut diagnostics = Vec::new();
    let mut malformed = |entry: String, reason: String| {
        diagnostics.push(Diagnostic::MalformedEntry {
            file: display_name.to_string(),
            entry,
            reason,
        });
    };

    if let Some(template) = fields.shift_remove(TEMPLATE_KEY) {
        map.template_to_follow = template;
    }

    match fields.shift_remove(ELEMENTS_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.into_iter().enumerate() {
                match decode_element(entry) {
                    Ok(element) => map.elements.push(element),
                    Err(reason) => malformed(format!("{}[{}]", ELEMENTS_KEY, index), reason),
                }
            }
        }
        Some(other) => malformed(
            ELEMENTS_KEY.to_string(),
            format!("expected an array, found {}", json_kind(&other)),
        ),
    }

    map.extra = fields;
    (map, diagnostics)
}

fn decode_element(entry: Value) -> Result<Element, String> {
    if !entry.is_object() {
        return Err(format!("expected an object, found {}", json_kind(&entry)));
    }
    match entry.get("name") {
        Some(Value::String(name)) if !name.is_empty() => {}
        _ => return Err("missing a string \"name\"".to_string()),
    }
    serde_json::from_value(entry).map_err(|err| err.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
