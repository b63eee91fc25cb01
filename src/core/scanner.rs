//! Scanner stage: source tree to element records.

use std::{collections::HashMap, fs};

use anyhow::{Result, bail};

use crate::{
    config::{AnnotationWindow, CategoryRule},
    core::{
        UpdateContext,
        categories::{combine_categories, path_categories},
        element::Element,
        file_scanner::{FileScanOptions, scan_files},
        parsers::{find_annotations, find_declarations},
    },
    issues::Diagnostic,
};

/// Output of the scanner stage.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// One element per name, in discovery order.
    pub elements: Vec<Element>,
    /// Number of source files whose declarations were collected.
    pub files_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan every source file under the configured scan root.
///
/// Files that cannot be read or are not UTF-8 are skipped and reported as
/// diagnostics. The generated module is never scanned.
///
/// # Errors
///
/// Returns error if the scan root is not a directory.
pub fn scan_elements(ctx: &UpdateContext) -> Result<ScanOutput> {
    let scan_root = ctx.scan_root();
    if !scan_root.is_dir() {
        bail!("Scan root is not a directory: {}", scan_root.display());
    }

    let excluded = [ctx.module_path()];
    let options = FileScanOptions {
        root_dir: &ctx.root_dir,
        extensions: &ctx.config.extensions,
        ignore_patterns: &ctx.config.ignores,
        excluded: &excluded,
    };
    let file_scan = scan_files(&scan_root, &options);

    let rules = ctx.config.normalized_rules();
    let mut output = ScanOutput {
        diagnostics: file_scan.diagnostics,
        ..Default::default()
    };
    let mut found = Vec::new();

    for path in &file_scan.files {
        let rel_path = ctx.relative(path);
        match fs::read_to_string(path) {
            Ok(source) => {
                found.extend(extract_elements(
                    &source,
                    &rel_path,
                    &rules,
                    ctx.config.annotation_window,
                ));
                output.files_scanned += 1;
            }
            Err(err) => output.diagnostics.push(Diagnostic::UnreadableFile {
                file: rel_path,
                reason: err.to_string(),
            }),
        }
    }

    let (elements, duplicates) = dedupe_by_name(found);
    output.elements = elements;
    output.diagnostics.extend(duplicates);
    Ok(output)
}

/// Extract element records from one file's source text.
///
/// `rules` must be normalized path rules.
pub fn extract_elements(
    source: &str,
    rel_path: &str,
    rules: &[CategoryRule],
    window: AnnotationWindow,
) -> Vec<Element> {
    let lines: Vec<&str> = source.lines().collect();
    let path_tags = path_categories(rel_path, rules);

    find_declarations(&lines)
        .into_iter()
        .map(|decl| {
            let annotations = find_annotations(&lines, decl.line, window);
            let categories = combine_categories(path_tags.clone(), annotations.categories);
            Element::scanned(
                decl.name,
                rel_path,
                decl.kind,
                decl.signature,
                annotations.description,
                categories,
            )
        })
        .collect()
}

/// Keep one element per name. A later declaration replaces an earlier one
/// in place, and each replacement is reported.
fn dedupe_by_name(found: Vec<Element>) -> (Vec<Element>, Vec<Diagnostic>) {
    let mut elements: Vec<Element> = Vec::with_capacity(found.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    for element in found {
        match index.get(&element.name) {
            Some(&pos) => {
                diagnostics.push(Diagnostic::DuplicateName {
                    name: element.name.clone(),
                    first_file: elements[pos].file.clone(),
                    kept_file: element.file.clone(),
                });
                elements[pos] = element;
            }
            None => {
                index.insert(element.name.clone(), elements.len());
                elements.push(element);
            }
        }
    }

    (elements, diagnostics)
}
