use crate::config::{CategoryRule, DEFAULT_CATEGORY};

/// Tags implied by a file's location.
///
/// `rules` must already be normalized (see [`crate::config::Config::normalized_rules`]).
/// The first rule whose fragment occurs in the lower-cased path applies.
pub fn path_categories(rel_path: &str, rules: &[CategoryRule]) -> Vec<String> {
    let path_lower = rel_path.to_lowercase();
    rules
        .iter()
        .find(|rule| path_lower.contains(&rule.path_contains))
        .map(|rule| rule.categories.clone())
        .unwrap_or_default()
}

/// Union of path tags and annotated tags, first occurrence kept.
///
/// Falls back to the single default tag when both are empty.
pub fn combine_categories(path_tags: Vec<String>, annotated: Vec<String>) -> Vec<String> {
    let mut combined: Vec<String> = Vec::with_capacity(path_tags.len() + annotated.len());
    for tag in path_tags.into_iter().chain(annotated) {
        if !combined.contains(&tag) {
            combined.push(tag);
        }
    }

    if combined.is_empty() {
        combined.push(DEFAULT_CATEGORY.to_string());
    }
    combined
}
