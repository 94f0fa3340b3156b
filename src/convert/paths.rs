//! Path utilities for the conversion pipeline.
//!
//! Drag-and-drop sources deliver paths with artifacts this module cleans up:
//! brace/bracket wrapping around individual paths, and space-separated lists
//! where paths containing spaces are brace-quoted. Directory inputs can be
//! expanded into all `.dbf` files found recursively.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expected source extension, without the leading dot.
pub const SOURCE_EXTENSION: &str = "dbf";

/// Whether `path` carries the `.dbf` extension (case-insensitive).
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Strip drop artifacts from a single path: surrounding whitespace, brace or
/// bracket wrapping, and quote characters.
///
/// `{C:\data\file.dbf}` and `C:\data\file.dbf` clean to the same path.
pub fn clean_dropped_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let cleaned = raw
        .trim()
        .trim_matches(['{', '}', '[', ']', '"', '\''])
        .trim();
    PathBuf::from(cleaned)
}

/// Split a raw drop payload into individual paths.
///
/// The payload is a space-separated list; a path containing spaces arrives
/// wrapped in `{...}`. Quote characters around bare paths are stripped.
pub fn split_drop_list(data: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brace = false;

    for ch in data.chars() {
        match ch {
            '{' if !in_brace => {
                in_brace = true;
                current.clear();
            }
            '}' if in_brace => {
                in_brace = false;
                parts.push(std::mem::take(&mut current));
            }
            ' ' if !in_brace => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
        .into_iter()
        .map(|p| p.trim_matches('"').to_string())
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Derive the output path for `input`: same base name, the engine's
/// extension, and the input's directory unless `output_dir` overrides it.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let with_ext = input.with_extension(extension);
    match output_dir {
        Some(dir) => with_ext
            .file_name()
            .map(|name| dir.join(name))
            .unwrap_or(with_ext),
        None => with_ext,
    }
}

/// Expand caller inputs into a flat list of candidate source paths.
///
/// Directories are walked recursively (in file-name order) for `.dbf` files;
/// plain paths are passed through after cleanup so the orchestrator can still
/// report on them. Duplicates are dropped.
pub fn collect_source_paths<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let path = clean_dropped_path(input.as_ref());
        if path.is_dir() {
            for entry in WalkDir::new(&path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file()
                    && has_source_extension(entry.path())
                    && !out.iter().any(|p| p == entry.path())
                {
                    out.push(entry.into_path());
                }
            }
        } else if !out.contains(&path) {
            out.push(path);
        }
    }
    out
}
