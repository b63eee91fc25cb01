//! Line-based parsers for JavaScript source.
//!
//! - `declarations`: exported constants, functions and classes
//! - `annotations`: `@desc` / `@category` comment markers near a declaration

pub mod annotations;
pub mod declarations;

pub use annotations::{Annotations, find_annotations};
pub use declarations::{Declaration, find_declarations, match_declaration};
