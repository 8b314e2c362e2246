//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `NETCAM_*` environment variables. Command-line flags are applied last by
//! the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{NetcamError, Result};

pub const DEFAULT_URL: &str = "http://dm365.local";
pub const DEFAULT_LOG_FILE: &str = "netcam.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_URL: &str = "NETCAM_URL";
const ENV_TIMEOUT: &str = "NETCAM_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL of the media server, e.g. `http://dm365.local`
  pub url: String,
  /// Seconds before a request gives up. Unset or `0` waits for the reply
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,
  pub log_file: PathBuf,
  pub log_level: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      url: DEFAULT_URL.to_string(),
      timeout_secs: None,
      log_file: PathBuf::from(DEFAULT_LOG_FILE),
      log_level: DEFAULT_LOG_LEVEL.to_string(),
    }
  }
}

impl Config {
  /// Defaults, overlaid with `path` when given, overlaid with the environment
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let mut config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let contents = fs::read_to_string(path)
      .map_err(|e| NetcamError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    Self::from_yaml(&contents)
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents).map_err(|e| NetcamError::Config(e.to_string()))
  }

  /// Apply `NETCAM_URL` and `NETCAM_TIMEOUT` as returned by `lookup`
  pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = lookup(ENV_URL) {
      self.url = url;
    }
    if let Some(timeout) = lookup(ENV_TIMEOUT) {
      let secs = timeout
        .trim()
        .parse()
        .map_err(|_| NetcamError::Config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT, timeout)))?;
      self.timeout_secs = Some(secs);
    }
    Ok(())
  }

  /// Request time bound, `None` when requests wait indefinitely
  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
  }

  pub fn level_filter(&self) -> Result<LevelFilter> {
    self.log_level
      .parse()
      .map_err(|_| NetcamError::Config(format!("unknown log level {:?}", self.log_level)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;
  use std::io::Write;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.url, "http://dm365.local");
    assert_eq!(config.timeout(), None);
    assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
  }

  #[test]
  fn test_partial_yaml_keeps_defaults() {
    let config = Config::from_yaml("url: http://10.0.0.7:88\n").unwrap();
    assert_eq!(config.url, "http://10.0.0.7:88");
    assert_eq!(config.timeout_secs, None);
    assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
  }

  #[test]
  fn test_empty_yaml_is_default() {
    assert_eq!(Config::from_yaml("").unwrap(), Config::default());
  }

  #[test]
  fn test_invalid_yaml() {
    let result = Config::from_yaml("timeout_secs: [not, a, number]");
    assert!(matches!(result, Err(NetcamError::Config(_))));
  }

  #[test]
  fn test_env_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "url: http://from-file\ntimeout_secs: 9").unwrap();

    let mut config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.url, "http://from-file");

    let env: HashMap<&str, &str> = [("NETCAM_URL", "http://from-env")].into_iter().collect();
    config.apply_overrides(|key| env.get(key).map(|v| v.to_string())).unwrap();

    assert_eq!(config.url, "http://from-env");
    assert_eq!(config.timeout_secs, Some(9));
    assert_eq!(config.timeout(), Some(Duration::from_secs(9)));
  }

  #[test]
  fn test_zero_timeout_waits_indefinitely() {
    let config = Config::from_yaml("timeout_secs: 0").unwrap();
    assert_eq!(config.timeout_secs, Some(0));
    assert_eq!(config.timeout(), None);

    let mut config = Config::default();
    config.apply_overrides(|key| (key == "NETCAM_TIMEOUT").then(|| "0".to_string())).unwrap();
    assert_eq!(config.timeout(), None);
  }

  #[test]
  fn test_bad_timeout_override() {
    let mut config = Config::default();
    let result = config.apply_overrides(|key| (key == "NETCAM_TIMEOUT").then(|| "soon".to_string()));
    assert!(matches!(result, Err(NetcamError::Config(_))));
  }

  #[test]
  fn test_missing_file() {
    let result = Config::from_file(Path::new("/nonexistent/netcam.yaml"));
    assert!(matches!(result, Err(NetcamError::Config(_))));
  }

  #[test]
  fn test_unknown_level() {
    let config = Config {
      log_level: "chatty".to_string(),
      ..Config::default()
    };
    assert!(config.level_filter().is_err());
  }
}
