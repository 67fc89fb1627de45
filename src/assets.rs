//! Static asset copying.
//!
//! `static/` is copied verbatim to `<output>/static/`. Content markdown is
//! handled by the walker; nothing else in `content/` is copied.

use crate::log;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Output subdirectory for static assets.
pub const STATIC_OUTPUT_DIR: &str = "static";

/// Copy every file under `static_dir` into `<output_root>/static`.
///
/// Returns the number of files copied. A missing `static_dir` copies nothing.
pub fn copy_static(static_dir: &Path, output_root: &Path) -> Result<usize> {
    if !static_dir.is_dir() {
        return Ok(0);
    }

    let dest_root = output_root.join(STATIC_OUTPUT_DIR);
    let files = collect_all_files(static_dir);

    for source in &files {
        let relative = source
            .strip_prefix(static_dir)
            .with_context(|| format!("File is not in static directory: {}", source.display()))?;
        let dest = dest_root.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(source, &dest)
            .with_context(|| format!("Failed to copy {}", source.display()))?;
    }

    log!("assets"; "copied {} files", files.len());
    Ok(files.len())
}

/// Collect all files from a directory recursively.
fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}
