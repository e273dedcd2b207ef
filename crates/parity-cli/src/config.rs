//! Settings resolution: flags and environment, then the TOML file, then
//! built-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parity_scenarios::{HarnessConfig, InstanceConfig};
use serde::Deserialize;

use crate::commands::RunArgs;

/// File looked up in the current directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fsmon-parity.toml";

pub const DEFAULT_BASELINE: &str = "/opt/fsmon-parity/baseline/bin/git";
pub const DEFAULT_CANDIDATE: &str = "/opt/fsmon-parity/candidate/bin/git";

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub baseline: Option<PathBuf>,
    pub candidate: Option<PathBuf>,
    pub work_root: Option<PathBuf>,
    pub primary_branch: Option<String>,
    pub rapid_files: Option<usize>,
    pub rapid_probe_interval: Option<usize>,
    pub excerpt_chars: Option<usize>,
    #[serde(default)]
    pub baseline_config: BTreeMap<String, String>,
    #[serde(default)]
    pub candidate_config: BTreeMap<String, String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Load the config file. An explicit path must exist; the default file is
/// optional.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if !required && !path.exists() {
        return Ok(FileConfig::default());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read config file '{}'", path.display()))?;
    let config = FileConfig::parse(&text)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub baseline: PathBuf,
    pub candidate: PathBuf,
    pub work_root: PathBuf,
    pub report_json: Option<PathBuf>,
    pub harness: HarnessConfig,
}

impl Settings {
    pub fn resolve(args: &RunArgs, file: FileConfig) -> Self {
        let defaults = HarnessConfig::default();
        let harness = HarnessConfig {
            primary_branch: args
                .primary_branch
                .clone()
                .or(file.primary_branch)
                .unwrap_or(defaults.primary_branch),
            rapid_files: args
                .rapid_files
                .or(file.rapid_files)
                .unwrap_or(defaults.rapid_files),
            rapid_probe_interval: file
                .rapid_probe_interval
                .unwrap_or(defaults.rapid_probe_interval),
            excerpt_chars: args
                .excerpt_chars
                .or(file.excerpt_chars)
                .unwrap_or(defaults.excerpt_chars),
            instance_config: InstanceConfig {
                baseline: file.baseline_config.into_iter().collect(),
                candidate: file.candidate_config.into_iter().collect(),
            },
        };
        Self {
            baseline: args
                .baseline
                .clone()
                .or(file.baseline)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASELINE)),
            candidate: args
                .candidate
                .clone()
                .or(file.candidate)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CANDIDATE)),
            work_root: args
                .work_root
                .clone()
                .or(file.work_root)
                .unwrap_or_else(default_work_root),
            report_json: args.report_json.clone(),
            harness,
        }
    }
}

fn default_work_root() -> PathBuf {
    std::env::temp_dir().join("fsmon-parity")
}
