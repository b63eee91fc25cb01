//! Non-fatal diagnostics collected during a run.
//!
//! Library code never prints; every condition that lets the run continue is
//! recorded here and rendered by the CLI (or returned by the MCP server).

use std::fmt;

/// A warning produced while scanning, loading or merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source file could not be read or was not valid UTF-8. Its
    /// declarations are left out of the run.
    UnreadableFile { file: String, reason: String },
    /// A directory entry could not be accessed while walking the scan root.
    InaccessiblePath { reason: String },
    /// The persisted map could not be parsed and was replaced by an empty one.
    CorruptMap { file: String, reason: String },
    /// One entry of the persisted map was unusable and left out. The rest of
    /// the map was kept.
    MalformedEntry {
        file: String,
        entry: String,
        reason: String,
    },
    /// The same name was declared more than once; the later one is kept.
    DuplicateName {
        name: String,
        first_file: String,
        kept_file: String,
    },
}

impl Diagnostic {
    /// True for diagnostics that mean a source file contributed nothing.
    pub fn is_skipped_source(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnreadableFile { .. } | Diagnostic::InaccessiblePath { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            Diagnostic::UnreadableFile { file, reason } => {
                format!("Skipping {}: {}", file, reason)
            }
            Diagnostic::InaccessiblePath { reason } => {
                format!("Cannot access path: {}", reason)
            }
            Diagnostic::CorruptMap { file, reason } => {
                format!("Could not decode {} ({}). Starting fresh.", file, reason)
            }
            Diagnostic::MalformedEntry {
                file,
                entry,
                reason,
            } => format!("Ignoring {} in {}: {}", entry, file, reason),
            Diagnostic::DuplicateName {
                name,
                first_file,
                kept_file,
            } => format!(
                "\"{}\" is declared in both {} and {}; keeping the one in {}",
                name, first_file, kept_file, kept_file
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
