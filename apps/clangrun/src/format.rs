//! Formatter runner: `clang-format` in place over every C/C++ file.
//!
//! Behavior:
//! - Discovers `.c`, `.h`, `.cpp`, `.hpp` files from the repository root.
//! - Skips paths containing `build/` or `vendor/`.
//! - Logs `Formatting <path>` before each invocation.
//! - Aborts on the first formatter failure; formatting is idempotent, so a
//!   re-run picks up where it stopped.
//! - A file counts as `formatted` only when its bytes changed; otherwise it
//!   is `clean`.
//!
//! In check mode the formatter runs with `--dry-run -Werror` and a non-zero
//! exit marks the file as unformatted instead of aborting.

use crate::discover::collect_files;
use crate::error::{Result, ToolError};
use crate::models::{FileOutcome, RunReport, Status};
use crate::output::Progress;
use crate::runner::CommandRunner;
use std::path::Path;

/// Effective formatter settings after config resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    pub binary: String,
    pub style: String,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            binary: "clang-format".to_string(),
            style: "file".to_string(),
            extensions: ["c", "h", "cpp", "hpp"].map(String::from).to_vec(),
            exclude: ["build/", "vendor/"].map(String::from).to_vec(),
        }
    }
}

/// Arguments for one formatter invocation on `file`.
pub fn format_args(settings: &FormatSettings, file: &str, check: bool) -> Vec<String> {
    let mut args = vec![format!("-style={}", settings.style)];
    if check {
        args.push("--dry-run".to_string());
        args.push("-Werror".to_string());
    } else {
        args.push("-i".to_string());
    }
    args.push(file.to_string());
    args
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ToolError::io(path, e))
}

/// Format every discovered file, one child process at a time.
pub fn run_format(
    root: &Path,
    settings: &FormatSettings,
    check: bool,
    runner: &dyn CommandRunner,
    progress: &Progress,
) -> Result<RunReport> {
    let files = collect_files(root, &[], &settings.extensions, &settings.exclude)?;
    let mut results = Vec::with_capacity(files.len());
    for f in &files {
        let msg = if check {
            format!("Checking {}", f.rel)
        } else {
            format!("Formatting {}", f.rel)
        };
        progress.step(&msg);
        let args = format_args(settings, &f.rel, check);
        let before = if check { None } else { Some(read_bytes(&f.path)?) };
        let status = runner.run(root, &settings.binary, &args)?;
        if status.success {
            let st = match before {
                Some(old) if read_bytes(&f.path)? != old => Status::Formatted,
                _ => Status::Clean,
            };
            results.push(FileOutcome::new(&f.rel, st, msg));
        } else if check {
            let note = format!("{} needs formatting", f.rel);
            progress.failure(&note);
            results.push(FileOutcome::new(&f.rel, Status::Unformatted, note));
        } else {
            return Err(ToolError::ToolFailed {
                program: settings.binary.clone(),
                file: f.rel.clone(),
                code: status.code,
            });
        }
    }
    Ok(RunReport::new("format", results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use std::fs;
    use tempfile::tempdir;

    fn tree(files: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for rel in files {
            let p = dir.path().join(rel);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, "int x;\n").unwrap();
        }
        dir
    }

    #[test]
    fn test_format_args_in_place() {
        let args = format_args(&FormatSettings::default(), "lib/VM/Exec.cpp", false);
        assert_eq!(args, vec!["-style=file", "-i", "lib/VM/Exec.cpp"]);
    }

    #[test]
    fn test_format_args_check_mode() {
        let args = format_args(&FormatSettings::default(), "a.c", true);
        assert_eq!(args, vec!["-style=file", "--dry-run", "-Werror", "a.c"]);
    }

    #[test]
    fn test_each_eligible_file_formatted_once() {
        let dir = tree(&[
            "lib/VM/Exec.cpp",
            "include/VM/Exec.hpp",
            "include/c/Common.h",
            "utils/shim.c",
            "build/CMakeFiles/probe.c",
            "vendor/fmt/core.h",
            "CMakeLists.txt",
        ]);
        let runner = RecordingRunner::default();
        let report = run_format(
            dir.path(),
            &FormatSettings::default(),
            false,
            &runner,
            &Progress::silent(),
        )
        .unwrap();
        let calls = runner.calls();
        let files: Vec<_> = calls.iter().map(|c| c.args.last().unwrap().clone()).collect();
        assert_eq!(
            files,
            vec![
                "include/VM/Exec.hpp",
                "include/c/Common.h",
                "lib/VM/Exec.cpp",
                "utils/shim.c"
            ]
        );
        assert!(calls.iter().all(|c| c.program == "clang-format"));
        // the recording runner leaves files as they were
        assert_eq!(report.summary.changed, 0);
        assert!(report.results.iter().all(|r| r.status == Status::Clean));
        assert_eq!(report.results[0].message, "Formatting include/VM/Exec.hpp");
    }

    #[test]
    fn test_only_rewritten_files_count_as_changed() {
        let dir = tree(&["a.c", "b.c"]);
        let runner = RecordingRunner {
            rewrite: vec!["b.c".to_string()],
            ..Default::default()
        };
        let report = run_format(
            dir.path(),
            &FormatSettings::default(),
            false,
            &runner,
            &Progress::silent(),
        )
        .unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.changed, 1);
        assert_eq!(report.results[0].status, Status::Clean);
        assert_eq!(report.results[1].status, Status::Formatted);
    }

    #[test]
    fn test_failure_aborts_run() {
        let dir = tree(&["a.c", "b.c", "c.c"]);
        let runner = RecordingRunner::failing("b.c", 1);
        let err = run_format(
            dir.path(),
            &FormatSettings::default(),
            false,
            &runner,
            &Progress::silent(),
        )
        .unwrap_err();
        match err {
            ToolError::ToolFailed { file, code, .. } => {
                assert_eq!(file, "b.c");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
        // c.c is never reached
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_check_mode_flags_instead_of_aborting() {
        let dir = tree(&["a.c", "b.c"]);
        let runner = RecordingRunner::failing("a.c", 1);
        let report = run_format(
            dir.path(),
            &FormatSettings::default(),
            true,
            &runner,
            &Progress::silent(),
        )
        .unwrap();
        assert_eq!(runner.calls().len(), 2);
        assert_eq!(report.summary.flagged, 1);
        assert_eq!(report.results[0].status, Status::Unformatted);
    }

    #[test]
    fn test_missing_formatter_propagates_spawn_error() {
        let dir = tree(&["a.c"]);
        let runner = RecordingRunner {
            spawn_error: true,
            ..Default::default()
        };
        let err = run_format(
            dir.path(),
            &FormatSettings::default(),
            false,
            &runner,
            &Progress::silent(),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
