pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file directly
pub const CONFIG_PATH_ENV: &str = "DRIFTFLOW_CONFIG_PATH";

const CONFIG_CANDIDATES: [&str; 2] = ["driftflow.yaml", ".driftflow.yaml"];

/// driftflow's global config directory (`~/.config/driftflow` on Linux)
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("driftflow");
    Ok(config_dir)
}

/// Find the driftflow config file
///
/// Search order:
/// 1. `DRIFTFLOW_CONFIG_PATH` (direct path)
/// 2. current directory: driftflow.yaml, .driftflow.yaml
/// 3. ./.driftflow/ directory, same order
/// 4. ~/.config/driftflow/driftflow.yaml (global)
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CONFIG_CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    let local_dir = current_dir.join(".driftflow");
    if local_dir.is_dir() {
        for filename in &CONFIG_CANDIDATES {
            let path = local_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Ok(config_dir) = get_config_dir() {
        let global_config = config_dir.join("driftflow.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// Settings for a drift detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// AWS profile name
    pub profile: String,
    /// AWS region
    pub region: String,
    /// Attempts per API call (SDK standard retry)
    pub max_attempts: u32,
    /// Substring a stack name must contain
    pub filter_text: Option<String>,
    /// One stack name per line; wins over `filter_text` when present
    pub stack_file: Option<PathBuf>,
    /// Stack→detection id map, written once per run
    pub submitted_file: PathBuf,
    /// One line per completed detection
    pub results_file: PathBuf,
    pub poll_interval_secs: u64,
    /// Status checks per stack before giving up; unset waits forever
    pub max_polls: Option<u32>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            region: "ap-southeast-1".to_string(),
            max_attempts: 3,
            filter_text: None,
            stack_file: None,
            submitted_file: PathBuf::from("temp.txt"),
            results_file: PathBuf::from("result.txt"),
            poll_interval_secs: 10,
            max_polls: None,
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub max_attempts: Option<u32>,
    pub filter_text: Option<String>,
    pub stack_file: Option<PathBuf>,
    pub submitted_file: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
    pub max_polls: Option<u32>,
}

impl DriftConfig {
    /// Load a YAML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the discovered config file, or defaults when there is none
    pub fn discover() -> Result<Self> {
        match find_config_file() {
            Ok(path) => Self::load(&path),
            Err(ConfigError::ConfigFileNotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply overrides on top of the file values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(profile) = overrides.profile {
            self.profile = profile;
        }
        if let Some(region) = overrides.region {
            self.region = region;
        }
        if let Some(max_attempts) = overrides.max_attempts {
            self.max_attempts = max_attempts;
        }
        if overrides.filter_text.is_some() {
            self.filter_text = overrides.filter_text;
        }
        if overrides.stack_file.is_some() {
            self.stack_file = overrides.stack_file;
        }
        if let Some(submitted_file) = overrides.submitted_file {
            self.submitted_file = submitted_file;
        }
        if let Some(results_file) = overrides.results_file {
            self.results_file = results_file;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        if overrides.max_polls.is_some() {
            self.max_polls = overrides.max_polls;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.profile.trim().is_empty() {
            return Err(ConfigError::Invalid("profile must not be empty".into()));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::Invalid("region must not be empty".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.max_polls == Some(0) {
            return Err(ConfigError::Invalid("max_polls must be at least 1".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
