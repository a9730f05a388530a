//! Application entry-point discovery.
//!
//! Provider rules check the files where an application mounts its
//! component tree. This module locates those files by path convention:
//! Next.js custom apps (`pages/_app.*`), app-router root layouts
//! (`app/layout.*`), and plain SPA entry modules (`src/main.*`,
//! `src/index.*`), each with and without a `src/` prefix.

use dsguard_core::ProjectContext;
use std::path::{Path, PathBuf};

/// Recognized (directory, stem) pairs, relative to the scan root.
const ENTRY_STEMS: &[(&str, &str)] = &[
    ("pages", "_app"),
    ("src/pages", "_app"),
    ("app", "layout"),
    ("src/app", "layout"),
    ("src", "main"),
    ("src", "index"),
    ("", "main"),
    ("", "index"),
    ("", "_app"),
    ("", "layout"),
];

const ENTRY_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

/// Returns all entry-point files among the scanned sources, sorted by
/// path. Empty when the project has no recognizable entry point.
#[must_use]
pub fn find_entry_points(ctx: &ProjectContext) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = ctx
        .source_files
        .iter()
        .filter(|path| {
            let relative = path
                .strip_prefix(ctx.root)
                .map_or_else(|_| path.as_path(), |p| p);
            is_entry_point(relative)
        })
        .cloned()
        .collect();
    entries.sort();
    entries
}

/// Checks whether a root-relative path is an application entry point.
#[must_use]
pub fn is_entry_point(relative: &Path) -> bool {
    let Some(ext) = relative.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if !ENTRY_EXTENSIONS.contains(&ext) {
        return false;
    }

    let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let parent = relative
        .parent()
        .map_or_else(String::new, |p| p.to_string_lossy().replace('\\', "/"));

    ENTRY_STEMS
        .iter()
        .any(|(dir, name)| *dir == parent && *name == stem)
}
