use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".codemaprc.json";

/// Tag applied when no path rule and no `@category` annotation matched.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for source files, relative to the project root.
    #[serde(default = "default_scan_root")]
    pub scan_root: String,
    /// File extensions (without the dot) considered source files.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    /// Persisted JSON map, relative to the project root.
    #[serde(default = "default_map_file")]
    pub map_file: String,
    /// Generated JavaScript module, relative to the project root.
    #[serde(default = "default_module_file")]
    pub module_file: String,
    #[serde(default = "default_module_export_name")]
    pub module_export_name: String,
    #[serde(default = "default_category_rules")]
    pub category_rules: Vec<CategoryRule>,
    #[serde(default)]
    pub annotation_window: AnnotationWindow,
}

/// Path-based category heuristic. The first rule whose `path_contains` is a
/// substring of the lower-cased relative path wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    pub path_contains: String,
    pub categories: Vec<String>,
}

impl CategoryRule {
    fn new(path_contains: &str, categories: &[&str]) -> Self {
        Self {
            path_contains: path_contains.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Lines searched around a declaration for `@desc` / `@category` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationWindow {
    #[serde(default = "default_window_before")]
    pub before: usize,
    #[serde(default = "default_window_after")]
    pub after: usize,
}

impl Default for AnnotationWindow {
    fn default() -> Self {
        Self {
            before: default_window_before(),
            after: default_window_after(),
        }
    }
}

fn default_scan_root() -> String {
    "scripts".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_map_file() -> String {
    "code_control/codebase-map.json".to_string()
}

fn default_module_file() -> String {
    "scripts/utils/codebaseMap.js".to_string()
}

fn default_module_export_name() -> String {
    "CODEBASE_MAP".to_string()
}

fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("scripts/ui/chat.js", &["CHAT", "UI"]),
        CategoryRule::new("scripts/ui/", &["UI"]),
        CategoryRule::new("scripts/logic.js", &["FACET", "LOGIC"]),
        CategoryRule::new("scripts/productcatalog.js", &["DATA"]),
        CategoryRule::new("scripts/app.js", &["APP"]),
        CategoryRule::new("scripts/constants.js", &["CONSTANTS"]),
        CategoryRule::new("scripts/utils/", &["UTILS"]),
    ]
}

fn default_window_before() -> usize {
    3
}

fn default_window_after() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_root: default_scan_root(),
            extensions: default_extensions(),
            ignores: default_ignores(),
            map_file: default_map_file(),
            module_file: default_module_file(),
            module_export_name: default_module_export_name(),
            category_rules: default_category_rules(),
            annotation_window: AnnotationWindow::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if an ignore pattern is not a valid glob, if no
    /// extension is configured, or if the export name is not a JS identifier.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        if !is_js_identifier(&self.module_export_name) {
            bail!(
                "'moduleExportName' is not a valid identifier: \"{}\"",
                self.module_export_name
            );
        }

        for rule in &self.category_rules {
            if rule.path_contains.is_empty() {
                bail!("'categoryRules' entries need a non-empty 'pathContains'");
            }
        }

        Ok(())
    }

    /// Lower-cases rule paths once so matching is a plain substring test.
    pub fn normalized_rules(&self) -> Vec<CategoryRule> {
        self.category_rules
            .iter()
            .map(|rule| CategoryRule {
                path_contains: rule.path_contains.replace('\\', "/").to_lowercase(),
                categories: rule.categories.clone(),
            })
            .collect()
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file that was loaded, `None` if using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// True if config was loaded from a file, false if using defaults.
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
