//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the codebase map to AI coding agents over stdio.
//!
//! ## Module Structure
//!
//! - `server`: MCP server and its tools
//! - `types`: tool parameter and result types

mod server;
pub mod types;

pub use server::{CodemapMcpServer, run_server};
