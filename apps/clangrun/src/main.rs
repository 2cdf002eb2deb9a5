//! clangrun CLI binary entry point.
//! Delegates to library modules for format/header/tidy and prints results.

use clangrun::cli::{wants_fix, Cli, Commands};
use clangrun::config::{self, CliOverrides, Effective};
use clangrun::error::ToolError;
use clangrun::output::{self, Progress};
use clangrun::runner::SystemRunner;
use clangrun::{format, header, tidy, utils};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Format {
            repo_root,
            output,
            check,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                ..Default::default()
            });
            let runner = SystemRunner::new(eff.output == "json");
            let progress = Progress::for_output(&eff.output);
            match format::run_format(&eff.repo_root, &eff.format, check, &runner, &progress) {
                Ok(report) => {
                    output::print_report(&report, &eff.output);
                    if check && report.summary.flagged > 0 {
                        std::process::exit(1);
                    }
                }
                Err(e) => fail(&e),
            }
        }
        Commands::Header {
            repo_root,
            output,
            template,
            check,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                template: template.as_deref(),
                ..Default::default()
            });
            let progress = Progress::for_output(&eff.output);
            match header::run_header(&eff.repo_root, &eff.header, check, &progress) {
                Ok(report) => {
                    output::print_report(&report, &eff.output);
                    if check && report.summary.flagged > 0 {
                        std::process::exit(1);
                    }
                }
                Err(e) => fail(&e),
            }
        }
        Commands::Tidy {
            mode,
            fix,
            repo_root,
            output,
            build_dir,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                build_dir: build_dir.as_deref(),
                ..Default::default()
            });
            let runner = SystemRunner::new(eff.output == "json");
            let progress = Progress::for_output(&eff.output);
            let fix = wants_fix(mode.as_deref(), fix);
            match tidy::run_tidy(&eff.repo_root, &eff.tidy, fix, &runner, &progress) {
                Ok(report) => output::print_report(&report, &eff.output),
                Err(
                    e @ (ToolError::MissingCompileDb(_)
                    | ToolError::HeaderFilter { .. }
                    | ToolError::Pattern { .. }),
                ) => fail(&e),
                // Anything past the preconditions is not treated as a crash.
                Err(e) => {
                    eprintln!("{} tidy stopped early: {}", utils::warn_prefix(), e);
                }
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn resolve_or_exit(cli: CliOverrides<'_>) -> Effective {
    match config::resolve_effective(&cli) {
        Ok(eff) => {
            if eff.config_path.is_none() && eff.output != "json" {
                log::info!("no clangrun.toml found; using defaults");
            }
            eff
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &ToolError) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    std::process::exit(e.exit_code());
}
