//! Configuration for the ampliseq task runner
//!
//! The config file is TOML and every key is optional. Unset keys fall back to
//! the fixed values the task has always used (`nextflow run nf-core/ampliseq
//! -profile charliecloud` rooted at `/root/work/`).

pub mod runner_path;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "AMPLISEQ_CONFIG";

pub const DEFAULT_RUNNER: &str = "nextflow";
pub const DEFAULT_PIPELINE: &str = "nf-core/ampliseq";
pub const DEFAULT_PROFILE: &str = "charliecloud";
pub const DEFAULT_WORK_DIR: &str = "/root/work/";
pub const DEFAULT_DESTINATION: &str = "latch:///ampliseq/results";
/// Output subdirectory created by the pipeline under the work dir
pub const OUTPUT_SUBDIR: &str = "results";

/// Keys accepted by `config set`
pub const KNOWN_KEYS: &[&str] = &[
    "runner-path",
    "pipeline",
    "profile",
    "work-dir",
    "destination",
    "staging-root",
];

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    UnknownKey(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to write config: {}", e),
            ConfigError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {}. Supported keys: {}",
                key,
                KNOWN_KEYS.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Local mirror of remote storage, laid out as `<root>/<scheme>/<bucket>/<key>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_root: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        let default = default_config_dir().join("ampliseq.toml");

        // A pointer file next to the default config may redirect to another location
        if let Some(parent) = default.parent() {
            let pointer = parent.join(".ampliseq_config_path");
            if let Ok(contents) = fs::read_to_string(&pointer) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
        }

        default
    }

    /// Path of the pointer file consulted by [`Config::path`]
    pub fn pointer_path() -> PathBuf {
        default_config_dir().join(".ampliseq_config_path")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content).map_err(ConfigError::Parse)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "runner-path" => self.runner_path.clone(),
            "pipeline" => self.pipeline.clone(),
            "profile" => self.profile.clone(),
            "work-dir" => self.work_dir.clone(),
            "destination" => self.destination.clone(),
            "staging-root" => self.staging_root.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "runner-path" => self.runner_path = Some(value),
            "pipeline" => self.pipeline = Some(value),
            "profile" => self.profile = Some(value),
            "work-dir" => self.work_dir = Some(value),
            "destination" => self.destination = Some(value),
            "staging-root" => self.staging_root = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values_iter().is_empty()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn get_pipeline(&self) -> String {
        self.pipeline
            .clone()
            .unwrap_or_else(|| DEFAULT_PIPELINE.to_string())
    }

    pub fn get_profile(&self) -> String {
        self.profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    pub fn get_work_dir(&self) -> PathBuf {
        PathBuf::from(self.work_dir.as_deref().unwrap_or(DEFAULT_WORK_DIR))
    }

    pub fn get_output_dir(&self) -> PathBuf {
        self.get_work_dir().join(OUTPUT_SUBDIR)
    }

    pub fn get_destination(&self) -> String {
        self.destination
            .clone()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string())
    }

    pub fn get_staging_root(&self) -> Option<PathBuf> {
        self.staging_root.as_ref().map(PathBuf::from)
    }

    pub fn get_runner_path(&self) -> String {
        runner_path::resolve_runner(self.runner_path.as_deref())
    }
}

fn default_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir().map(|home| home.join(".config"));

    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();

    base.unwrap_or_else(|| PathBuf::from(".")).join("ampliseq")
}
