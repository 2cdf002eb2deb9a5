//! Configuration discovery and effective settings resolution.
//!
//! The repository root is `--repo-root` (default: current dir) exactly as
//! given; discovery and writes never leave it. clangrun reads
//! `clangrun.toml|yaml|yml` from that directory only and merges it with CLI
//! flags to produce an `Effective` config. Defaults:
//! - `output`: `human`
//! - `format`: `clang-format -style=file` over `c,h,cpp,hpp`, excluding
//!   `build/` and `vendor/`
//! - `header.template`: `utils/resources/HEADER.txt`, roots `src`, `include`
//! - `tidy`: `clang-tidy` with the built-in check list, database in `build/`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, ToolError};
use crate::format::FormatSettings;
use crate::header::HeaderSettings;
use crate::tidy::TidySettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["clangrun.toml", "clangrun.yaml", "clangrun.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[format]` section.
pub struct FormatCfg {
    pub binary: Option<String>,
    pub style: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[header]` section.
pub struct HeaderCfg {
    pub template: Option<String>,
    pub roots: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[tidy]` section.
pub struct TidyCfg {
    pub binary: Option<String>,
    pub checks: Option<Vec<String>>,
    pub header_filter: Option<String>,
    pub build_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `clangrun.toml|yaml`.
pub struct ClangrunConfig {
    pub output: Option<String>,
    pub format: Option<FormatCfg>,
    pub header: Option<HeaderCfg>,
    pub tidy: Option<TidyCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub format: FormatSettings,
    pub header: HeaderSettings,
    pub tidy: TidySettings,
}

/// CLI-provided overrides; `None` falls through to config and defaults.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub template: Option<&'a str>,
    pub build_dir: Option<&'a str>,
}

/// Path of the config file in `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.is_file())
}

/// Load `ClangrunConfig` from `root`. A present but malformed file is an error.
pub fn load_config(root: &Path) -> Result<Option<ClangrunConfig>> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|e| ToolError::io(&path, e))?;
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    let parsed = if is_toml {
        toml::from_str::<ClangrunConfig>(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<ClangrunConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map(Some).map_err(|message| ToolError::Config { path, message })
}

fn pick<T: Clone>(cfg: Option<&T>, default: T) -> T {
    cfg.cloned().unwrap_or(default)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective> {
    let repo_root = PathBuf::from(cli.repo_root.unwrap_or("."));
    let config_path = find_config(&repo_root);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    if let Some(p) = config_path.as_ref() {
        log::debug!("using config {}", p.display());
    }

    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ToolError::Config {
            path: config_path.clone().unwrap_or_else(|| PathBuf::from("--output")),
            message: format!("unknown output mode `{}` (expected human|json)", output),
        });
    }

    let fd = FormatSettings::default();
    let fc = cfg.format.unwrap_or_default();
    let format = FormatSettings {
        binary: pick(fc.binary.as_ref(), fd.binary),
        style: pick(fc.style.as_ref(), fd.style),
        extensions: pick(fc.extensions.as_ref(), fd.extensions),
        exclude: pick(fc.exclude.as_ref(), fd.exclude),
    };

    let hd = HeaderSettings::default();
    let hc = cfg.header.unwrap_or_default();
    let template = cli
        .template
        .map(PathBuf::from)
        .or_else(|| hc.template.as_ref().map(PathBuf::from))
        .unwrap_or(hd.template);
    let header = HeaderSettings {
        template,
        roots: pick(hc.roots.as_ref(), hd.roots),
        extensions: pick(hc.extensions.as_ref(), hd.extensions),
        exclude: pick(hc.exclude.as_ref(), hd.exclude),
    };

    let td = TidySettings::default();
    let tc = cfg.tidy.unwrap_or_default();
    let build_dir = cli
        .build_dir
        .map(str::to_string)
        .or(tc.build_dir)
        .unwrap_or(td.build_dir);
    let tidy = TidySettings {
        binary: pick(tc.binary.as_ref(), td.binary),
        checks: pick(tc.checks.as_ref(), td.checks),
        header_filter: pick(tc.header_filter.as_ref(), td.header_filter),
        build_dir,
        extensions: pick(tc.extensions.as_ref(), td.extensions),
        exclude: pick(tc.exclude.as_ref(), td.exclude),
    };

    Ok(Effective {
        repo_root,
        config_path,
        output,
        format,
        header,
        tidy,
    })
}
