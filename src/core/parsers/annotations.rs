use regex::Regex;
use std::sync::LazyLock;

use crate::config::AnnotationWindow;

/// Metadata markers found near a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Text of the first non-empty `@desc` marker in the window, trimmed.
    pub description: String,
    /// Tags of the first non-empty `@category` marker in the window, in written order.
    pub categories: Vec<String>,
}

// Matches both line and JSDoc comment styles:
// - // @desc Computes foo
// - * @description Computes foo
static DESC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?://|\*)\s*@desc(?:ription)?\b\s*(.*)").unwrap());

// - // @category UI, CHAT
static CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?://|\*)\s*@category\b\s*(.*)").unwrap());

/// Collect annotations from the lines around `decl_line`.
///
/// The window spans `window.before` lines above and `window.after` lines
/// below the declaration, clipped to the file. The declaration line itself is
/// never searched. Lines are visited top to bottom and the first marker of
/// each kind with non-empty text wins.
pub fn find_annotations(lines: &[&str], decl_line: usize, window: AnnotationWindow) -> Annotations {
    let start = decl_line.saturating_sub(window.before);
    let end = decl_line.saturating_add(window.after).min(lines.len().saturating_sub(1));

    let mut description: Option<String> = None;
    let mut categories: Option<Vec<String>> = None;

    for idx in start..=end {
        if idx == decl_line {
            continue;
        }
        let Some(line) = lines.get(idx) else {
            break;
        };

        if description.is_none()
            && let Some(caps) = DESC_REGEX.captures(line)
        {
            let text = clean_marker_text(&caps[1]);
            if !text.is_empty() {
                description = Some(text.to_string());
            }
        }

        if categories.is_none()
            && let Some(caps) = CATEGORY_REGEX.captures(line)
        {
            let tags = split_categories(clean_marker_text(&caps[1]));
            if !tags.is_empty() {
                categories = Some(tags);
            }
        }

        if description.is_some() && categories.is_some() {
            break;
        }
    }

    Annotations {
        description: description.unwrap_or_default(),
        categories: categories.unwrap_or_default(),
    }
}

/// Strip surrounding whitespace and a trailing block-comment terminator.
fn clean_marker_text(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix("*/").unwrap_or(text).trim_end()
}

fn split_categories(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}
