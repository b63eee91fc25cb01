//! Element and map types persisted in the codebase map.
//!
//! Field names follow the JSON layout consumed by the web application
//! (`sideEffects`, `type`, `template-to-follow`). Unknown keys on either the
//! map or an element are kept in `extra` and written back unchanged.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::config::DEFAULT_CATEGORY;

/// Signature recorded for constants; the value type is not inferred.
pub const CONSTANT_SIGNATURE: &str = "N/A";

/// Signature recorded for classes.
pub const CLASS_SIGNATURE: &str = "class";

/// Kind of exported declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Constant,
    Function,
    Class,
}

/// One exported declaration with its metadata.
///
/// Derived fields (`file`, `kind`, `signature`, `categories`) are recomputed
/// on every scan. Curated fields (`description`, `dependencies`,
/// `side_effects`) are maintained by hand and survive merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub file: String,
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: ElementKind,
    #[serde(default, deserialize_with = "or_default")]
    pub signature: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub side_effects: bool,
    #[serde(
        default = "default_categories",
        deserialize_with = "categories_or_default"
    )]
    pub categories: Vec<String>,
    /// Hand-added keys that are not part of the known layout.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn default_categories() -> Vec<String> {
    vec![DEFAULT_CATEGORY.to_string()]
}

// A null or ill-typed stored value decodes to the field's default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn categories_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| default_categories()))
}

impl Element {
    /// Build a freshly scanned element with curated fields at their defaults.
    pub fn scanned(
        name: impl Into<String>,
        file: impl Into<String>,
        kind: ElementKind,
        signature: impl Into<String>,
        description: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            kind,
            signature: signature.into(),
            description: description.into(),
            dependencies: Vec::new(),
            side_effects: false,
            categories,
            extra: Map::new(),
        }
    }

    /// Copy the derived fields of `scanned` onto this record.
    ///
    /// The description is only replaced when the scan found a non-empty one.
    pub fn refresh_from(&mut self, scanned: &Element) {
        self.file.clone_from(&scanned.file);
        self.kind = scanned.kind;
        self.signature.clone_from(&scanned.signature);
        self.categories.clone_from(&scanned.categories);
        if !scanned.description.is_empty() {
            self.description.clone_from(&scanned.description);
        }
        if self.categories.is_empty() {
            self.categories = default_categories();
        }
    }

    fn sort_key(&self) -> (&str, &str) {
        (&self.file, &self.name)
    }
}

/// Signature synthesized for a function from its verbatim parameter text.
pub fn function_signature(params: &str) -> String {
    format!("({}) => void", params)
}

/// The persisted codebase map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebaseMap {
    /// Opaque value kept for the consumers of the map.
    #[serde(rename = "template-to-follow", default = "default_template")]
    pub template_to_follow: Value,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_template() -> Value {
    Value::Array(Vec::new())
}

impl Default for CodebaseMap {
    fn default() -> Self {
        Self {
            template_to_follow: default_template(),
            elements: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl CodebaseMap {
    /// Sort elements by `(file, name)` so output diffs stay stable.
    pub fn sort_elements(&mut self) {
        self.elements.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.name == name)
    }
}
