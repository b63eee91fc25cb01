//! Merger stage.
//!
//! Elements are matched by name. Scanned elements refresh the derived fields
//! of a persisted record and keep its curated ones. Persisted elements that
//! were not scanned are dropped: the map only describes code that exists.
//! The dropped names are returned so callers can report them.

use std::collections::HashMap;

use crate::core::element::{CodebaseMap, Element};

/// Result of merging a scan into a persisted map.
#[derive(Debug)]
pub struct MergeOutcome {
    pub map: CodebaseMap,
    /// Names that were not in the persisted map.
    pub added: Vec<String>,
    /// Names whose record changed.
    pub changed: Vec<String>,
    /// Names whose record is identical to the persisted one.
    pub unchanged: usize,
    /// Persisted names absent from the scan, now removed.
    pub removed: Vec<String>,
}

impl MergeOutcome {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.changed.is_empty() || !self.removed.is_empty()
    }
}

/// Merge `scanned` into `existing`.
///
/// `scanned` is expected to hold one element per name; a later duplicate
/// would replace an earlier one's merged record. The template and any other
/// top-level keys of `existing` pass through unchanged.
pub fn merge_maps(existing: CodebaseMap, scanned: Vec<Element>) -> MergeOutcome {
    let CodebaseMap {
        template_to_follow,
        elements: existing_elements,
        extra,
    } = existing;

    let mut lookup: HashMap<String, Element> = existing_elements
        .into_iter()
        .map(|el| (el.name.clone(), el))
        .collect();

    let mut merged: HashMap<String, Element> = HashMap::with_capacity(scanned.len());
    let mut added = Vec::new();
    let mut changed = Vec::new();
    let mut unchanged = 0;

    for new_el in scanned {
        let name = new_el.name.clone();
        match lookup.remove(&name) {
            Some(previous) => {
                let mut entry = previous.clone();
                entry.refresh_from(&new_el);
                if entry == previous {
                    unchanged += 1;
                } else {
                    changed.push(name.clone());
                }
                merged.insert(name, entry);
            }
            None => {
                if !merged.contains_key(&name) {
                    added.push(name.clone());
                }
                merged.insert(name, new_el);
            }
        }
    }

    let mut removed: Vec<String> = lookup.into_keys().collect();
    removed.sort();
    added.sort();
    changed.sort();

    let mut map = CodebaseMap {
        template_to_follow,
        elements: merged.into_values().collect(),
        extra,
    };
    map.sort_elements();

    MergeOutcome {
        map,
        added,
        changed,
        unchanged,
        removed,
    }
}
