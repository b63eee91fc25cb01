use regex::Regex;
use std::sync::LazyLock;

use crate::core::element::{CLASS_SIGNATURE, CONSTANT_SIGNATURE, ElementKind, function_signature};

/// A top-level declaration recognized on a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Zero-based line index.
    pub line: usize,
    pub name: String,
    pub kind: ElementKind,
    pub signature: String,
}

// export const NAME
static EXPORT_CONST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+const\s+([\w$]+)").unwrap());

// export [async] function[*] NAME(PARAMS)
static EXPORT_FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:async\s+)?function(?:\s*\*\s*|\s+)([\w$]+)\s*\(([^)]*)\)").unwrap()
});

// export class NAME
static EXPORT_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+class\s+([\w$]+)").unwrap());

// Unexported function declared at column 0.
static LOCAL_FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?function(?:\s*\*\s*|\s+)([\w$]+)\s*\(([^)]*)\)").unwrap()
});

/// Recognize the declaration on one line, if any.
///
/// At most one declaration is taken per line, tried in the order constant,
/// exported function, class, then unexported top-level function.
pub fn match_declaration(line: &str) -> Option<(String, ElementKind, String)> {
    if let Some(caps) = EXPORT_CONST_REGEX.captures(line) {
        return Some((
            caps[1].to_string(),
            ElementKind::Constant,
            CONSTANT_SIGNATURE.to_string(),
        ));
    }
    if let Some(caps) = EXPORT_FUNCTION_REGEX.captures(line) {
        return Some((
            caps[1].to_string(),
            ElementKind::Function,
            function_signature(&caps[2]),
        ));
    }
    if let Some(caps) = EXPORT_CLASS_REGEX.captures(line) {
        return Some((
            caps[1].to_string(),
            ElementKind::Class,
            CLASS_SIGNATURE.to_string(),
        ));
    }
    if let Some(caps) = LOCAL_FUNCTION_REGEX.captures(line) {
        return Some((
            caps[1].to_string(),
            ElementKind::Function,
            function_signature(&caps[2]),
        ));
    }
    None
}

/// Find every recognized declaration in `lines`, in line order.
pub fn find_declarations(lines: &[&str]) -> Vec<Declaration> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            match_declaration(line).map(|(name, kind, signature)| Declaration {
                line: idx,
                name,
                kind,
                signature,
            })
        })
        .collect()
}
