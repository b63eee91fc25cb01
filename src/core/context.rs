use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    utils::relative_slash_path,
};

/// Configuration and resolved paths for one run.
///
/// Built once at startup and passed explicitly to every stage.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--scan-root web`)
/// 2. `.codemaprc.json` config file
/// 3. Built-in defaults
pub struct UpdateContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root. Element `file` paths and every configured path are
    /// relative to it. This is the directory holding the config file, or
    /// the start directory when no config file was found.
    pub root_dir: PathBuf,

    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,

    /// Whether to report every diagnostic instead of a summary line.
    pub verbose: bool,
}

impl UpdateContext {
    /// Create a new `UpdateContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the start directory does not exist or the config
    /// file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let start_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let start_dir = start_dir
            .canonicalize()
            .with_context(|| format!("Project root does not exist: {}", start_dir.display()))?;

        let loaded = load_config(&start_dir)?;
        let root_dir = loaded
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or(start_dir);

        let mut config = loaded.config;
        if let Some(scan_root) = &common_args.scan_root {
            config.scan_root.clone_from(scan_root);
        }
        if let Some(map_file) = &common_args.map_file {
            config.map_file.clone_from(map_file);
        }
        if let Some(module_file) = &common_args.module_file {
            config.module_file.clone_from(module_file);
        }

        Ok(Self {
            config,
            root_dir,
            config_path: loaded.path,
            verbose: common_args.verbose,
        })
    }

    pub fn scan_root(&self) -> PathBuf {
        self.root_dir.join(&self.config.scan_root)
    }

    pub fn map_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.map_file)
    }

    pub fn module_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.module_file)
    }

    /// Path relative to the project root, `/`-separated.
    pub fn relative(&self, path: &Path) -> String {
        relative_slash_path(&self.root_dir, path)
    }
}
