//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Render a path with `/` separators, dropping `.` segments.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use codemap::utils::slash_path;
///
/// assert_eq!(slash_path(Path::new("./scripts/ui/chat.js")), "scripts/ui/chat.js");
/// assert_eq!(slash_path(Path::new("scripts//utils/")), "scripts/utils");
/// ```
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `root` with `/` separators.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => slash_path(rel),
        Err(_) => slash_path(path),
    }
}
