//! clangrun core library.
//!
//! This crate exposes programmatic APIs for running the external C/C++
//! formatter and linter over a source tree and for stamping license headers
//! onto source files.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `discover`: Recursive file discovery with directory exclusions.
//! - `runner`: Synchronous child process invocation.
//! - `format`: `clang-format` runner.
//! - `header`: Header template rendering and idempotent injection.
//! - `tidy`: `clang-tidy` runner with the compile database precondition.
//! - `models`: Per-file outcomes and run summaries.
//! - `output`: Human/JSON printers.
//! - `error`: Shared error type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod format;
pub mod header;
pub mod models;
pub mod output;
pub mod runner;
pub mod tidy;
pub mod utils;
