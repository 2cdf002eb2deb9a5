//! Tidy runner: `clang-tidy` per file against the compile database.
//!
//! The compile database must exist before anything is scanned. Per-file
//! linter failures are reported and skipped; the run itself still succeeds.

use crate::discover::collect_files;
use crate::error::{Result, ToolError};
use crate::models::{FileOutcome, RunReport, Status};
use crate::output::Progress;
use crate::runner::CommandRunner;
use regex::Regex;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHECKS: [&str; 6] = [
    "llvm-qualified-auto",
    "modernize-use-using",
    "modernize-use-equals-default",
    "llvm-else-after-return",
    "modernize-use-trailing-return-type",
    "modernize-pass-by-value",
];

/// Lint project headers only, never vendored ones.
pub const DEFAULT_HEADER_FILTER: &str = r"include/(VM/.*|.*\.h(pp)?(.in)?)";

pub const COMPILE_DB: &str = "compile_commands.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidySettings {
    pub binary: String,
    pub checks: Vec<String>,
    pub header_filter: String,
    /// Directory holding `compile_commands.json`, relative to the root.
    pub build_dir: String,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for TidySettings {
    fn default() -> Self {
        TidySettings {
            binary: "clang-tidy".to_string(),
            checks: DEFAULT_CHECKS.map(String::from).to_vec(),
            header_filter: DEFAULT_HEADER_FILTER.to_string(),
            build_dir: "build".to_string(),
            extensions: ["cpp", "hpp"].map(String::from).to_vec(),
            exclude: ["build/", "vendor/", "tests/", "bench/"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl TidySettings {
    pub fn compile_db(&self, root: &Path) -> PathBuf {
        root.join(&self.build_dir).join(COMPILE_DB)
    }

    /// Reject a header filter the linter would choke on.
    pub fn validate(&self) -> Result<()> {
        Regex::new(&self.header_filter).map_err(|source| ToolError::HeaderFilter {
            pattern: self.header_filter.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Arguments for one linter invocation on `file`.
pub fn tidy_args(settings: &TidySettings, file: &str, fix: bool) -> Vec<String> {
    let mut args = vec![
        format!("--checks={}", settings.checks.join(",")),
        "-warnings-as-errors=*".to_string(),
        format!("-header-filter={}", settings.header_filter),
        file.to_string(),
    ];
    if fix {
        args.push("--fix-errors".to_string());
    }
    args.push("-p".to_string());
    args.push(settings.build_dir.clone());
    args
}

/// Lint every discovered file; `fix` applies the linter's fixes in place.
///
/// Returns `MissingCompileDb` without scanning when the database is absent.
/// Non-zero linter exits and a linter that cannot be started both become
/// `Failed` outcomes; the loop always runs to the end.
pub fn run_tidy(
    root: &Path,
    settings: &TidySettings,
    fix: bool,
    runner: &dyn CommandRunner,
    progress: &Progress,
) -> Result<RunReport> {
    let db = settings.compile_db(root);
    if !db.is_file() {
        return Err(ToolError::MissingCompileDb(db));
    }
    settings.validate()?;

    let files = collect_files(root, &[], &settings.extensions, &settings.exclude)?;
    let mut results = Vec::with_capacity(files.len());
    for f in &files {
        progress.step(&format!("Tidying {}", f.rel));
        let args = tidy_args(settings, &f.rel, fix);
        let ok = match runner.run(root, &settings.binary, &args) {
            Ok(status) => status.success,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        };
        if ok {
            results.push(FileOutcome::new(&f.rel, Status::Clean, format!("Tidied {}", f.rel)));
        } else {
            let msg = format!("Tidy failed for {}", f.rel);
            progress.highlight_failure(&msg);
            results.push(FileOutcome::new(&f.rel, Status::Failed, msg));
        }
    }
    Ok(RunReport::new("tidy", results))
}
