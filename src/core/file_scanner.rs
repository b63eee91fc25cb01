use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::issues::Diagnostic;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths under the project root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of walking the scan root.
pub struct FileScanResult {
    /// Source files in traversal order (sorted by file name per directory).
    pub files: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Options for [`scan_files`].
pub struct FileScanOptions<'a> {
    pub root_dir: &'a Path,
    pub extensions: &'a [String],
    pub ignore_patterns: &'a [String],
    /// Files never returned, e.g. the generated module.
    pub excluded: &'a [PathBuf],
}

pub fn scan_files(scan_root: &Path, options: &FileScanOptions<'_>) -> FileScanResult {
    let mut files = Vec::new();
    let mut diagnostics = Vec::new();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    // Patterns were validated with the config; anything invalid here is dropped.
    for p in options.ignore_patterns {
        if is_glob_pattern(p) {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        } else {
            literal_ignore_paths.push(options.root_dir.join(p));
        }
    }

    let walker = WalkDir::new(scan_root).sort_by_file_name().into_iter();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                diagnostics.push(Diagnostic::InaccessiblePath {
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();

        if !entry.file_type().is_file() || !has_extension(path, options.extensions) {
            continue;
        }

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let path_str = path.to_string_lossy();
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if options.excluded.iter().any(|excluded| excluded == path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    FileScanResult { files, diagnostics }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
