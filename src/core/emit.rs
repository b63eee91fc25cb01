//! Emitter stage: the JSON map and the generated JavaScript module.
//!
//! Both files are rendered in memory, written to sibling temporary files and
//! only then renamed into place, so a failed run leaves both untouched.

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::element::CodebaseMap;

const TEMP_SUFFIX: &str = ".codemap-tmp";

/// Rendered contents of both output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    pub json: String,
    pub module: String,
}

/// Render the JSON file (2-space indent, trailing newline) and the module.
pub fn render_outputs(map: &CodebaseMap, export_name: &str) -> Result<RenderedOutputs> {
    let payload = serde_json::to_string_pretty(map).context("Failed to serialize codebase map")?;
    let module = format!(
        "/**\n * Codebase Map (Auto-generated)\n * Generated by {}\n * DO NOT EDIT MANUALLY\n */\nexport const {} = {};\n",
        env!("CARGO_PKG_NAME"),
        export_name,
        payload
    );

    Ok(RenderedOutputs {
        json: format!("{}\n", payload),
        module,
    })
}

/// Write both outputs, creating missing directories.
pub fn write_outputs(outputs: &RenderedOutputs, map_path: &Path, module_path: &Path) -> Result<()> {
    let map_tmp = write_temp(map_path, &outputs.json)?;
    let module_tmp = match write_temp(module_path, &outputs.module) {
        Ok(tmp) => tmp,
        Err(err) => {
            let _ = fs::remove_file(&map_tmp);
            return Err(err);
        }
    };

    fs::rename(&map_tmp, map_path)
        .with_context(|| format!("Failed to write file: {}", map_path.display()))?;
    fs::rename(&module_tmp, module_path)
        .with_context(|| format!("Failed to write file: {}", module_path.display()))?;

    Ok(())
}

fn write_temp(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    Ok(tmp)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

/// State of one output file compared with what a run would write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    UpToDate,
    Stale,
    Missing,
}

/// State of both outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStatus {
    pub map: FileState,
    pub module: FileState,
}

impl OutputStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.map == FileState::UpToDate && self.module == FileState::UpToDate
    }
}

/// Compare rendered outputs with the files on disk without writing.
pub fn compare_outputs(
    outputs: &RenderedOutputs,
    map_path: &Path,
    module_path: &Path,
) -> Result<OutputStatus> {
    Ok(OutputStatus {
        map: file_state(map_path, &outputs.json)?,
        module: file_state(module_path, &outputs.module)?,
    })
}

fn file_state(path: &Path, expected: &str) -> Result<FileState> {
    match fs::read(path) {
        Ok(current) if current == expected.as_bytes() => Ok(FileState::UpToDate),
        Ok(_) => Ok(FileState::Stale),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(FileState::Missing),
        Err(err) => Err(err).with_context(|| format!("Failed to read file: {}", path.display())),
    }
}
