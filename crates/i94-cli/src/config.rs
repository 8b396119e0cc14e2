//! Run configuration: source and destination paths.
//!
//! Paths come from a JSON config file, from CLI flags, or both; a flag
//! always overrides the config file. Credentials and remote storage
//! are out of scope here — paths are local filesystem paths prepared
//! by the hosting environment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::RunArgs;

/// Optional path set as read from a JSON config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub immigration: Option<PathBuf>,
    pub labels: Option<PathBuf>,
    pub temperature: Option<PathBuf>,
    pub demographics: Option<PathBuf>,
    pub airports: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Load a config file; a missing or malformed file is a fatal
    /// configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse config file {}", path.display()))
    }
}

/// Fully resolved paths for one run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub immigration: PathBuf,
    pub labels: PathBuf,
    pub temperature: PathBuf,
    pub demographics: PathBuf,
    pub airports: PathBuf,
    pub output_dir: PathBuf,
}

/// Merge CLI flags over the (optional) config file and require every
/// path to be present.
pub fn resolve(args: &RunArgs) -> Result<ResolvedConfig> {
    let file = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    let mut missing = Vec::new();
    let mut pick = |flag: &Option<PathBuf>, from_file: Option<PathBuf>, name: &'static str| {
        let value = flag.clone().or(from_file);
        if value.is_none() {
            missing.push(name);
        }
        value
    };

    let immigration = pick(&args.immigration, file.immigration, "immigration");
    let labels = pick(&args.labels, file.labels, "labels");
    let temperature = pick(&args.temperature, file.temperature, "temperature");
    let demographics = pick(&args.demographics, file.demographics, "demographics");
    let airports = pick(&args.airports, file.airports, "airports");
    let output_dir = pick(&args.output_dir, file.output_dir, "output-dir");

    if !missing.is_empty() {
        bail!(
            "missing required paths (set via flags or config file): {}",
            missing.join(", ")
        );
    }

    Ok(ResolvedConfig {
        immigration: immigration.unwrap_or_default(),
        labels: labels.unwrap_or_default(),
        temperature: temperature.unwrap_or_default(),
        demographics: demographics.unwrap_or_default(),
        airports: airports.unwrap_or_default(),
        output_dir: output_dir.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_args() -> RunArgs {
        RunArgs {
            config: None,
            immigration: Some("/data/immigration".into()),
            labels: Some("/data/labels.sas".into()),
            temperature: Some("/data/temps.csv".into()),
            demographics: Some("/data/demo.csv".into()),
            airports: Some("/data/airports.csv".into()),
            output_dir: Some("/out".into()),
            dry_run: false,
        }
    }

    #[test]
    fn flags_alone_resolve() {
        let resolved = resolve(&base_args()).unwrap();
        assert_eq!(resolved.output_dir, PathBuf::from("/out"));
    }

    #[test]
    fn missing_paths_are_listed() {
        let mut args = base_args();
        args.labels = None;
        args.output_dir = None;
        let err = resolve(&args).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("labels"));
        assert!(message.contains("output-dir"));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("run.json");
        let mut file = fs::File::create(&config_path).unwrap();
        write!(
            file,
            "{}",
            r#"{"labels": "/from-config/labels.sas", "output_dir": "/from-config/out"}"#
        )
        .unwrap();

        let mut args = base_args();
        args.config = Some(config_path);
        args.labels = None; // comes from the file
        // output_dir flag stays and must win
        let resolved = resolve(&args).unwrap();
        assert_eq!(resolved.labels, PathBuf::from("/from-config/labels.sas"));
        assert_eq!(resolved.output_dir, PathBuf::from("/out"));
    }
}
