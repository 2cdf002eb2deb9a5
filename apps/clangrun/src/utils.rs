//! Supporting helpers: colored message prefixes and path display.

use owo_colors::OwoColorize;
use std::path::Path;

/// Whether stderr prefixes should be colorized.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if colors_enabled() {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn warn_prefix() -> String {
    prefix("warn:", |s| s.yellow().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.cyan().bold().to_string())
}

/// Render `path` relative to `root` with `/` separators.
///
/// Exclusion rules are plain substring checks (`build/`), so every path is
/// compared in this normalized form regardless of platform.
pub fn rel_slash(root: &Path, path: &Path) -> String {
    let rel = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
