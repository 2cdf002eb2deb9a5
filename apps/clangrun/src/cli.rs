//! CLI argument parsing via `clap`.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "clangrun",
    version,
    about = "Run clang-format, clang-tidy and header injection over a C/C++ tree",
    long_about = "clangrun — a tiny CLI that formats, lints, and stamps license headers on C/C++ sources.\n\nConfiguration precedence: CLI > clangrun.toml > defaults.",
    after_help = "Examples:\n  clangrun format\n  clangrun header --check\n  clangrun tidy\n  clangrun tidy apply",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v debug, -vv trace)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current clangrun version.")]
    Version,
    /// Format sources in place with clang-format
    #[command(
        about = "Run clang-format in place",
        long_about = "Format every .c/.h/.cpp/.hpp file outside build/ and vendor/. Stops at the first formatter failure.",
        after_help = "Examples:\n  clangrun format\n  clangrun format --check --output json"
    )]
    Format {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = ArgAction::SetTrue, help = "Report files that would change; do not write")]
        check: bool,
    },
    /// Prepend the license header template
    #[command(
        about = "Add license headers",
        long_about = "Prepend the rendered header template to sources under src/ and include/ that do not start with it yet.",
        after_help = "Examples:\n  clangrun header\n  clangrun header --template utils/resources/HEADER.txt --check"
    )]
    Header {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Header template (default: utils/resources/HEADER.txt)")]
        template: Option<String>,
        #[arg(long, action = ArgAction::SetTrue, help = "Exit non-zero if any file lacks the header; do not write")]
        check: bool,
    },
    /// Lint sources with clang-tidy
    #[command(
        about = "Run clang-tidy",
        long_about = "Lint .cpp/.hpp files outside build/, vendor/, tests/ and bench/ using build/compile_commands.json. Per-file failures are reported and skipped.",
        after_help = "Examples:\n  clangrun tidy\n  clangrun tidy apply\n  clangrun tidy --build-dir cmake-build-debug"
    )]
    Tidy {
        #[arg(value_parser = ["apply"], help = "Pass `apply` to let clang-tidy fix errors in place")]
        mode: Option<String>,
        #[arg(long, action = ArgAction::SetTrue, help = "Same as `apply`")]
        fix: bool,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Directory containing compile_commands.json (default: build)")]
        build_dir: Option<String>,
    },
}

/// Whether a tidy invocation asked for fixes (`apply` or `--fix`).
pub fn wants_fix(mode: Option<&str>, fix: bool) -> bool {
    fix || mode == Some("apply")
}
