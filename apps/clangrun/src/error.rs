//! Error type shared by the format, header and tidy commands.
//!
//! Precondition failures (missing template, missing compile database) and
//! tool failures are distinct variants so the binary can map them to exit
//! codes without string matching.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Header template resource is absent.
    #[error("Required resources do not exist. ({})", .0.display())]
    MissingTemplate(PathBuf),

    /// `compile_commands.json` has not been generated yet.
    #[error("You need to build the project first to use clang-tidy (missing {})", .0.display())]
    MissingCompileDb(PathBuf),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external binary could not be started at all.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external binary ran and exited non-zero.
    #[error("`{program}` failed for {file} ({})", describe_code(.code))]
    ToolFailed {
        program: String,
        file: String,
        code: Option<i32>,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid header filter `{pattern}`: {source}")]
    HeaderFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("bad glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

impl ToolError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used by the binary for this error.
    ///
    /// Missing preconditions and tool failures exit with 1; configuration
    /// mistakes exit with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Config { .. } | ToolError::HeaderFilter { .. } | ToolError::Pattern { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
