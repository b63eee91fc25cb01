//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - (none) / `update`: scan, merge and rewrite the map and generated module
//! - `check`: report whether the outputs are up to date without writing
//! - `init`: write a default configuration file
//! - `serve`: start the MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Arguments {
    /// The command to run; no subcommand means `update`.
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Update)
    }

    pub fn verbose(&self) -> bool {
        self.common.verbose
    }
}

/// Arguments shared by all commands. Paths other than `--root` are relative
/// to the project root.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory to start looking for .codemaprc.json (default: current directory)
    #[arg(long, env = "CODEMAP_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Directory to scan for source files (overrides config file)
    #[arg(long, global = true)]
    pub scan_root: Option<String>,

    /// JSON map output path (overrides config file)
    #[arg(long, global = true)]
    pub map_file: Option<String>,

    /// Generated module output path (overrides config file)
    #[arg(long, global = true)]
    pub module_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Scan sources, merge into the codebase map and regenerate the module (default)
    Update,
    /// Exit with status 1 if the codebase map or generated module is out of date
    Check,
    /// Initialize a new .codemaprc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
