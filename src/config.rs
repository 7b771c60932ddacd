use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SparkError};
use crate::lifecycle::DEFAULT_DECAY_DAYS;
use crate::storage::DEFAULT_DATA_FILE;

/// Config file picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sparkfire.yaml";

/// Board settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Where the board is stored.
    pub data_file: PathBuf,
    /// Whole days without access before an in-progress item is discarded.
    pub decay_days: u32,
    /// Warn about in-progress items this many days (or fewer) from decaying.
    pub warn_days: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            decay_days: DEFAULT_DECAY_DAYS,
            warn_days: 2,
        }
    }
}

impl BoardConfig {
    /// Read and validate a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SparkError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// An explicit path must exist; otherwise `sparkfire.yaml` in `dir` is
    /// used when present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::from_file(&candidate);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.decay_days == 0 {
            return Err(SparkError::Config(
                "decay_days must be at least 1".to_string(),
            ));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(SparkError::Config("data_file must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert_eq!(config.decay_days, 7);
        assert_eq!(config.warn_days, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.yaml");
        fs::write(&path, "decay_days: 14\n").unwrap();

        let config = BoardConfig::from_file(&path).unwrap();
        assert_eq!(config.decay_days, 14);
        assert_eq!(config.warn_days, 2);
        assert_eq!(config.data_file, PathBuf::from("data.json"));
    }

    #[test]
    fn test_zero_decay_days_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "decay_days: 0\n").unwrap();
        assert!(matches!(
            BoardConfig::from_file(&path),
            Err(SparkError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "decay_days: [not, a, number]\n").unwrap();
        assert!(matches!(BoardConfig::from_file(&path), Err(SparkError::Yaml(_))));
    }

    #[test]
    fn test_discover() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            BoardConfig::discover(None, tmp.path()).unwrap(),
            BoardConfig::default()
        );

        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "data_file: board.json\n").unwrap();
        let found = BoardConfig::discover(None, tmp.path()).unwrap();
        assert_eq!(found.data_file, PathBuf::from("board.json"));

        let missing = tmp.path().join("nope.yaml");
        assert!(matches!(
            BoardConfig::discover(Some(missing.as_path()), tmp.path()),
            Err(SparkError::Config(_))
        ));
    }
}
