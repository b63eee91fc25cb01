//! Codemap - keeps a codebase map of a JavaScript project in sync with its source
//!
//! Codemap scans JavaScript files for exported constants, functions and
//! classes, merges them into a persisted JSON map while keeping hand-written
//! fields, and regenerates a JavaScript module exposing the same data.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scan, merge and emit pipeline
//! - `issues`: Non-fatal diagnostics
//! - `mcp`: Model Context Protocol server implementation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod utils;
