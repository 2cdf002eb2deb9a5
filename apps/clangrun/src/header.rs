//! Header injector: prepend a license/banner template to source files.
//!
//! The template is read once and rendered per file by substituting:
//! - `{filename}`: the file's basename (`Exec.hpp.in`)
//! - `{name}`: the basename with every extension removed (`Exec`)
//! - `{impl}`: `interface` for headers and header templates, otherwise
//!   `implementation`
//!
//! A file is rewritten only when its content does not already start with the
//! rendered header, so repeated runs leave files untouched after the first.

use crate::discover::{collect_files, SourceFile};
use crate::error::{Result, ToolError};
use crate::models::{FileOutcome, RunReport, Status};
use crate::output::Progress;
use std::fs;
use std::path::{Path, PathBuf};

/// Resource location of the template relative to the repository root.
pub const DEFAULT_TEMPLATE: &str = "utils/resources/HEADER.txt";

const INTERFACE_SUFFIXES: [&str; 4] = [".hpp", ".h", ".hpp.in", ".h.in"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSettings {
    /// Template path; relative paths resolve against the repository root.
    pub template: PathBuf,
    pub roots: Vec<String>,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        HeaderSettings {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            roots: ["src", "include"].map(String::from).to_vec(),
            extensions: ["c", "h", "cpp", "hpp", "hpp.in", "h.in"]
                .map(String::from)
                .to_vec(),
            exclude: vec!["build/".to_string()],
        }
    }
}

/// Role of a file as substituted for `{impl}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Interface,
    Implementation,
}

impl Role {
    pub fn of(file_name: &str) -> Role {
        if INTERFACE_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
            Role::Interface
        } else {
            Role::Implementation
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Interface => "interface",
            Role::Implementation => "implementation",
        }
    }
}

/// Basename up to the first `.`.
pub fn module_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

#[derive(Debug, Clone)]
pub struct HeaderTemplate {
    text: String,
}

impl HeaderTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        HeaderTemplate { text: text.into() }
    }

    /// Read the template, failing with `MissingTemplate` when absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ToolError::MissingTemplate(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        Ok(HeaderTemplate::new(text))
    }

    /// Header text for a file named `file_name`.
    pub fn render(&self, file_name: &str) -> String {
        self.text
            .replace("{filename}", file_name)
            .replace("{name}", module_name(file_name))
            .replace("{impl}", Role::of(file_name).as_str())
    }
}

/// Prepend `header` to the file at `path` unless it already starts with it.
///
/// Returns whether the file was rewritten.
pub fn inject(path: &Path, header: &str) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    if content.starts_with(header) {
        return Ok(false);
    }
    let mut out = String::with_capacity(header.len() + 1 + content.len());
    out.push_str(header);
    out.push('\n');
    out.push_str(&content);
    fs::write(path, out).map_err(|e| ToolError::io(path, e))?;
    Ok(true)
}

fn has_header(path: &Path, header: &str) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    Ok(content.starts_with(header))
}

fn process(file: &SourceFile, tpl: &HeaderTemplate, check: bool) -> Result<FileOutcome> {
    let header = tpl.render(file.file_name());
    if check {
        return Ok(if has_header(&file.path, &header)? {
            FileOutcome::new(&file.rel, Status::Present, format!("Header present in {}", file.rel))
        } else {
            FileOutcome::new(&file.rel, Status::Missing, format!("Header missing from {}", file.rel))
        });
    }
    Ok(if inject(&file.path, &header)? {
        FileOutcome::new(&file.rel, Status::Added, format!("Adding header to {}", file.rel))
    } else {
        FileOutcome::new(
            &file.rel,
            Status::Present,
            format!("Header already added to {}", file.rel),
        )
    })
}

/// Inject (or with `check`, verify) headers across the configured roots.
///
/// The template is checked before any file is discovered.
pub fn run_header(
    root: &Path,
    settings: &HeaderSettings,
    check: bool,
    progress: &Progress,
) -> Result<RunReport> {
    let tpl_path = root.join(&settings.template);
    let tpl = HeaderTemplate::load(&tpl_path)?;
    let files = collect_files(root, &settings.roots, &settings.extensions, &settings.exclude)?;
    let mut results = Vec::with_capacity(files.len());
    for f in &files {
        let outcome = process(f, &tpl, check)?;
        if outcome.status == Status::Missing {
            progress.failure(&outcome.message);
        } else {
            progress.step(&outcome.message);
        }
        results.push(outcome);
    }
    Ok(RunReport::new("header", results))
}
