use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{config::Config, core::Element};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project (or any directory inside it)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetMapParams {
    /// Absolute path of the project (or any directory inside it)
    pub project_root_path: String,
    /// Only elements tagged with this category (case-insensitive)
    pub category: Option<String>,
    /// Only elements whose file path contains this text
    pub file: Option<String>,
    /// Number of elements to skip (default 0)
    pub offset: Option<u32>,
    /// Maximum number of elements to return (default 50, max 200)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupElementParams {
    /// Absolute path of the project (or any directory inside it)
    pub project_root_path: String,
    /// Exact element name, e.g. "renderChat"
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMapParams {
    /// Absolute path of the project (or any directory inside it)
    pub project_root_path: String,
    /// Compute the merge without writing any file (default false)
    pub dry_run: Option<bool>,
}

// ============================================================
// Results
// ============================================================

/// Result of get_config
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub project_root: String,
    pub config: Config,
}

/// Result of get_map
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResult {
    pub map_file: String,
    /// Set when the map file does not exist or could not be fully decoded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Number of elements matching the filters
    pub total_count: usize,
    pub items: Vec<Element>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Result of update_map
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMapResult {
    /// False for dry runs
    pub written: bool,
    pub files_scanned: usize,
    pub element_count: usize,
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged_count: usize,
    /// Elements dropped because their declaration is gone
    pub removed: Vec<String>,
    pub warnings: Vec<String>,
}
