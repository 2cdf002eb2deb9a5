//! Child process invocation for the external formatter and linter.
//!
//! Every command goes through `CommandRunner` so runs can be observed in
//! tests without spawning real tools. Invocations are synchronous: one child
//! at a time, awaited to completion.

use crate::error::{Result, ToolError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Exit information of a finished child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn ok() -> Self {
        ToolStatus {
            success: true,
            code: Some(0),
        }
    }

    pub fn exited(code: i32) -> Self {
        ToolStatus {
            success: code == 0,
            code: Some(code),
        }
    }
}

pub trait CommandRunner {
    /// Run `program` with `args` from `cwd` and wait for it to exit.
    ///
    /// Only a failure to start the child is an `Err`; a non-zero exit is
    /// reported through `ToolStatus`.
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> Result<ToolStatus>;
}

/// Runs real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner {
    /// Send child stdout to our stderr (keeps stdout clean for JSON output).
    pub stdout_to_stderr: bool,
}

impl SystemRunner {
    pub fn new(stdout_to_stderr: bool) -> Self {
        SystemRunner { stdout_to_stderr }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[String]) -> Result<ToolStatus> {
        log::debug!("exec: {} {}", program, args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd).stderr(Stdio::inherit());
        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(std::io::stderr()));
        } else {
            cmd.stdout(Stdio::inherit());
        }
        let status = cmd.status().map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;
        Ok(ToolStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_system_runner_reports_exit_code() {
        let dir = tempdir().unwrap();
        let runner = SystemRunner::new(false);
        let st = runner
            .run(dir.path(), "sh", &["-c".to_string(), "exit 3".to_string()])
            .unwrap();
        assert!(!st.success);
        assert_eq!(st.code, Some(3));
    }

    #[test]
    fn test_system_runner_spawn_failure_is_error() {
        let dir = tempdir().unwrap();
        let runner = SystemRunner::default();
        let err = runner
            .run(dir.path(), "clangrun-definitely-missing-binary", &[])
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
