//! Result models shared by the format, header and tidy commands.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// What happened to a single file.
pub enum Status {
    /// Formatter rewrote the file in place.
    Formatted,
    /// Formatter check mode reported pending changes.
    Unformatted,
    /// Header was prepended.
    Added,
    /// Header was already present; file untouched.
    Present,
    /// Header check mode found no header.
    Missing,
    /// Tool ran and reported nothing.
    Clean,
    Failed,
}

#[derive(Serialize, Debug, Clone)]
/// Per-file result with the message that was reported for it.
pub struct FileOutcome {
    pub file: String,
    pub status: Status,
    pub message: String,
}

impl FileOutcome {
    pub fn new(file: &str, status: Status, message: impl Into<String>) -> Self {
        FileOutcome {
            file: file.to_string(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
/// Aggregated counts used by printers and exit-code decisions.
pub struct Summary {
    pub total: usize,
    pub changed: usize,
    pub flagged: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Serialize, Debug, Clone)]
/// Outcome of one command run.
pub struct RunReport {
    pub command: String,
    pub results: Vec<FileOutcome>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(command: &str, results: Vec<FileOutcome>) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Summary::default()
        };
        for r in &results {
            match r.status {
                Status::Formatted | Status::Added => summary.changed += 1,
                Status::Unformatted | Status::Missing => summary.flagged += 1,
                Status::Present => summary.skipped += 1,
                Status::Failed => summary.failed += 1,
                Status::Clean => {}
            }
        }
        RunReport {
            command: command.to_string(),
            results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_by_status() {
        let report = RunReport::new(
            "header",
            vec![
                FileOutcome::new("src/a.cpp", Status::Added, "Adding header to src/a.cpp"),
                FileOutcome::new("src/b.cpp", Status::Present, "Header already added to src/b.cpp"),
                FileOutcome::new("src/c.cpp", Status::Present, "Header already added to src/c.cpp"),
            ],
        );
        assert_eq!(
            report.summary,
            Summary {
                total: 3,
                changed: 1,
                flagged: 0,
                skipped: 2,
                failed: 0,
            }
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let out = serde_json::to_value(FileOutcome::new("x.hpp", Status::Failed, "boom")).unwrap();
        assert_eq!(out["status"], "failed");
    }
}
