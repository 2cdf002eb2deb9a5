//! Output rendering for format, header, and tidy runs.
//!
//! Supports `human` (default) and `json` outputs. Human mode streams one
//! line per file while the run progresses and ends with a summary line; JSON
//! mode stays quiet and prints a single report document at the end.

use crate::models::{RunReport, Status};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

/// Per-file progress lines emitted during a run.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
    color: bool,
}

impl Progress {
    pub fn for_output(output: &str) -> Self {
        Progress {
            enabled: output != "json",
            color: use_colors(output),
        }
    }

    pub fn silent() -> Self {
        Progress {
            enabled: false,
            color: false,
        }
    }

    pub fn step(&self, msg: &str) {
        if self.enabled {
            println!("{}", msg);
        }
    }

    pub fn failure(&self, msg: &str) {
        if !self.enabled {
            return;
        }
        if self.color {
            println!("{}", msg.yellow().bold());
        } else {
            println!("{}", msg);
        }
    }

    /// Red, bold, underlined; used for linter failures.
    pub fn highlight_failure(&self, msg: &str) {
        if !self.enabled {
            return;
        }
        if self.color {
            println!("{}", msg.red().bold().underline());
        } else {
            println!("{}", msg);
        }
    }
}

/// Print the closing report for a run.
pub fn print_report(report: &RunReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_report_json(report)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let s = &report.summary;
            let line = format!(
                "— Summary — files={} changed={} flagged={} skipped={} failed={}",
                s.total, s.changed, s.flagged, s.skipped, s.failed
            );
            if use_colors(output) {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
            if s.total == 0 {
                eprintln!(
                    "{} no matching files found for `{}`",
                    crate::utils::note_prefix(),
                    report.command
                );
            }
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &RunReport) -> JsonVal {
    let items: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            serde_json::json!({
                "file": r.file,
                "status": r.status,
                "message": r.message,
                "wrote": matches!(r.status, Status::Formatted | Status::Added),
            })
        })
        .collect();
    serde_json::json!({
        "command": report.command,
        "results": items,
        "summary": report.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileOutcome;

    #[test]
    fn test_compose_report_json_shape() {
        let report = RunReport::new(
            "header",
            vec![
                FileOutcome::new("src/a.cpp", Status::Added, "Adding header to src/a.cpp"),
                FileOutcome::new("src/b.cpp", Status::Present, "Header already added to src/b.cpp"),
            ],
        );
        let out = compose_report_json(&report);
        assert_eq!(out["command"], "header");
        assert_eq!(out["summary"]["changed"], 1);
        assert_eq!(out["summary"]["skipped"], 1);
        assert_eq!(out["results"][0]["wrote"], true);
        assert_eq!(out["results"][1]["status"], "present");
    }

    #[test]
    fn test_json_progress_is_silent() {
        let p = Progress::for_output("json");
        assert!(!p.enabled);
        assert!(!p.color);
    }
}
