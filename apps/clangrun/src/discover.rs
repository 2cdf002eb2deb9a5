//! Recursive source discovery by extension with substring exclusions.

use crate::error::{Result, ToolError};
use crate::utils::rel_slash;
use glob::{glob_with, MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A discovered file: absolute location plus its `/`-separated path relative
/// to the repository root. Tools are invoked with `rel` from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rel: String,
}

impl SourceFile {
    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.rel.rsplit('/').next().unwrap_or(&self.rel)
    }
}

/// True when `rel` contains any exclusion marker, e.g. `build/`.
pub fn is_excluded(rel: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|ex| !ex.is_empty() && rel.contains(ex.as_str()))
}

/// Collect files under each of `bases` (relative to `root`; empty means the
/// root itself) whose names end in one of `extensions`.
///
/// Results are de-duplicated and sorted by relative path so each file is
/// handed to a tool exactly once, in a stable order. Hidden directories are
/// not descended into.
pub fn collect_files(
    root: &Path,
    bases: &[String],
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<SourceFile>> {
    let opts = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let root_pat = Pattern::escape(&root.to_string_lossy());
    let whole_root = [String::new()];
    let bases = if bases.is_empty() { &whole_root[..] } else { bases };

    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
    for base in bases {
        let base = base.trim_matches('/');
        for ext in extensions {
            let ext = ext.trim_start_matches('.');
            let pattern = if base.is_empty() {
                format!("{}/**/*.{}", root_pat, ext)
            } else {
                format!("{}/{}/**/*.{}", root_pat, Pattern::escape(base), ext)
            };
            let entries = glob_with(&pattern, opts).map_err(|source| ToolError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in entries {
                let entry = match entry {
                    Ok(p) => p,
                    Err(e) => {
                        log::warn!("skipping {}: {}", e.path().display(), e.error());
                        continue;
                    }
                };
                if !entry.is_file() {
                    continue;
                }
                let rel = rel_slash(root, &entry);
                if is_excluded(&rel, exclude) {
                    log::trace!("excluded {}", rel);
                    continue;
                }
                found.entry(rel).or_insert(entry);
            }
        }
    }
    log::debug!("discovered {} file(s) under {}", found.len(), root.display());
    Ok(found
        .into_iter()
        .map(|(rel, path)| SourceFile { path, rel })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "").unwrap();
    }

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_filters_extensions_and_exclusions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for f in [
            "main.c",
            "lib/VM/State.cpp",
            "include/VM/State.hpp",
            "include/c/Common.h",
            "build/gen.cpp",
            "vendor/fmt/format.h",
            "README.md",
            "lib/VM/notes.txt",
        ] {
            touch(root, f);
        }
        let files = collect_files(
            root,
            &[],
            &strs(&["c", "h", "cpp", "hpp"]),
            &strs(&["build/", "vendor/"]),
        )
        .unwrap();
        let rels: Vec<_> = files.iter().map(|f| f.rel.as_str()).collect();
        assert_eq!(
            rels,
            vec!["include/VM/State.hpp", "include/c/Common.h", "lib/VM/State.cpp", "main.c"]
        );
    }

    #[test]
    fn test_collect_under_bases_only() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/a.cpp");
        touch(root, "include/a.hpp.in");
        touch(root, "tools/b.cpp");
        let files = collect_files(
            root,
            &strs(&["src", "include"]),
            &strs(&["cpp", "hpp", "hpp.in"]),
            &strs(&["build/"]),
        )
        .unwrap();
        let rels: Vec<_> = files.iter().map(|f| f.rel.clone()).collect();
        assert_eq!(rels, vec!["include/a.hpp.in", "src/a.cpp"]);
        assert_eq!(files[0].file_name(), "a.hpp.in");
    }

    #[test]
    fn test_overlapping_extensions_yield_one_entry() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/x.h.in");
        let files = collect_files(root, &[], &strs(&["in", "h.in"]), &[]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_hidden_dirs_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, ".cache/x.cpp");
        touch(root, "y.cpp");
        let files = collect_files(root, &[], &strs(&["cpp"]), &[]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel, "y.cpp");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "locked/inner/x.cpp");
        touch(root, "open/y.cpp");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let files = collect_files(root, &[], &strs(&["cpp"]), &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let rels: Vec<_> = files.unwrap().into_iter().map(|f| f.rel).collect();
        assert!(rels.contains(&"open/y.cpp".to_string()));
    }

    #[test]
    fn test_is_excluded_substring() {
        let ex = strs(&["build/", "tests/"]);
        assert!(is_excluded("build/x.cpp", &ex));
        assert!(is_excluded("lib/tests/x.cpp", &ex));
        assert!(!is_excluded("lib/VM/x.cpp", &ex));
        assert!(!is_excluded("lib/x.cpp", &[String::new()]));
    }
}
