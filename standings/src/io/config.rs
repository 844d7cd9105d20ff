//! Standings configuration stored in `standings.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::ingest::MalformedLinePolicy;
use crate::io::files::write_atomic;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "standings.toml";

/// Standings configuration (TOML).
///
/// Intended to be edited by humans. Missing fields default to the file names
/// the results have always been shipped under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StandingsConfig {
    /// What to do with a line that fails to parse or apply.
    pub malformed_lines: MalformedLinePolicy,

    /// Write a JSON snapshot of the standings after every round into this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,

    pub datasets: DatasetPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetPaths {
    /// Current-season results stream.
    pub current: PathBuf,
    /// Historical ("classics") results stream.
    pub classic: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            current: PathBuf::from("roundsResults.txt"),
            classic: PathBuf::from("classicRoundsResults.txt"),
        }
    }
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            malformed_lines: MalformedLinePolicy::Abort,
            snapshot_dir: None,
            datasets: DatasetPaths::default(),
        }
    }
}

impl StandingsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.datasets.current.as_os_str().is_empty() {
            return Err(anyhow!("datasets.current must be a non-empty path"));
        }
        if self.datasets.classic.as_os_str().is_empty() {
            return Err(anyhow!("datasets.classic must be a non-empty path"));
        }
        if self
            .snapshot_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(anyhow!("snapshot_dir must be a non-empty path when set"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// A missing file means "all defaults"; any other read failure is an error.
pub fn load_config(path: &Path) -> Result<StandingsConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<StandingsConfig>(&contents)
            .with_context(|| format!("parse {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => StandingsConfig::default(),
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Validate and write config as TOML.
pub fn write_config(path: &Path, cfg: &StandingsConfig) -> Result<()> {
    cfg.validate()?;
    let buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    write_atomic(path, &buf)
}
