//! Core pipeline: scan, merge, emit.
//!
//! ## Module Structure
//!
//! - `context`: configuration and resolved paths for one run
//! - `element`: element and map types
//! - `file_scanner`: source file discovery
//! - `parsers`: declaration and annotation matching
//! - `categories`: path-based category rules
//! - `scanner`: source tree to elements
//! - `store`: loading the persisted map
//! - `merge`: merging a scan into the persisted map
//! - `emit`: rendering and writing both outputs
//! - `update`: the stages chained together

pub mod categories;
pub mod context;
pub mod element;
pub mod emit;
pub mod file_scanner;
pub mod merge;
pub mod parsers;
pub mod scanner;
pub mod store;
pub mod update;

pub use context::UpdateContext;
pub use element::{CodebaseMap, Element, ElementKind};
pub use update::{Progress, UpdatePlan, plan_update};
