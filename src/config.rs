use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote nutrition service settings
    #[serde(default)]
    pub nutrition: NutritionConfig,
    /// Local recipe storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the remote nutrition service
#[derive(Debug, Deserialize, Clone)]
pub struct NutritionConfig {
    /// Base URL; `/ingredients` is appended for every request
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, 0 disables the timeout
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl NutritionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for local persistence
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.abdulhabeeb.de/api".to_string()
}

fn default_timeout() -> u64 {
    0
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".recipes")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__NUTRITION__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config("config")
    }
}

/// Load configuration from the named file (extension optional) and the environment
pub fn load_config(file: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file).required(false))
        // Use double underscore for nested keys: RECIPES__STORAGE__DATA_DIR
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
