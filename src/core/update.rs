use std::path::Path;

use anyhow::Result;

use crate::{
    core::{
        UpdateContext,
        emit::{RenderedOutputs, render_outputs},
        merge::{MergeOutcome, merge_maps},
        scanner::{ScanOutput, scan_elements},
        store::{LoadedMap, load_map},
    },
    issues::Diagnostic,
};

/// Progress events emitted between stages.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Scanning { scan_root: &'a Path },
    Scanned { elements: usize, files: usize },
    Loading { map_path: &'a Path },
    Merging,
}

/// Everything a run computes before it writes.
#[derive(Debug)]
pub struct UpdatePlan {
    pub scan: ScanOutput,
    pub loaded: LoadedMap,
    pub merge: MergeOutcome,
    pub outputs: RenderedOutputs,
}

impl UpdatePlan {
    /// Diagnostics from every stage, in stage order.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.scan
            .diagnostics
            .iter()
            .chain(self.loaded.diagnostics.iter())
            .collect()
    }
}

/// Scan, load and merge, then render both outputs. Nothing is written.
pub fn plan_update(
    ctx: &UpdateContext,
    on_progress: &mut dyn FnMut(Progress<'_>),
) -> Result<UpdatePlan> {
    let scan_root = ctx.scan_root();
    on_progress(Progress::Scanning {
        scan_root: &scan_root,
    });
    let scan = scan_elements(ctx)?;
    on_progress(Progress::Scanned {
        elements: scan.elements.len(),
        files: scan.files_scanned,
    });

    let map_path = ctx.map_path();
    on_progress(Progress::Loading {
        map_path: &map_path,
    });
    let loaded = load_map(&map_path, &ctx.relative(&map_path))?;

    on_progress(Progress::Merging);
    let merge = merge_maps(loaded.map.clone(), scan.elements.clone());
    let outputs = render_outputs(&merge.map, &ctx.config.module_export_name)?;

    Ok(UpdatePlan {
        scan,
        loaded,
        merge,
        outputs,
    })
}
