//! Configuration loading from defaults, JSON files and environment variables.
//!
//! Sources are layered in priority order: defaults, then `<dir>/<name>.json`,
//! then `<PREFIX>_<NAME>_<KEY>` environment variables. Each layer replaces
//! top-level keys of the one below it.

use crate::{HdkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source priority (higher number = higher priority)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    Default = 0,
    File = 1,
    Environment = 2,
}

/// Configuration manager for handling multiple configuration sources
pub struct ConfigManager {
    config_dir: PathBuf,
    environment_prefix: String,
    loaded_configs: HashMap<String, serde_json::Value>,
}

impl ConfigManager {
    pub fn new(config_dir: PathBuf, environment_prefix: &str) -> Self {
        Self {
            config_dir,
            environment_prefix: environment_prefix.to_string(),
            loaded_configs: HashMap::new(),
        }
    }

    fn config_path(&self, config_name: &str) -> PathBuf {
        self.config_dir.join(format!("{}.json", config_name))
    }

    /// Load configuration from multiple sources
    pub fn load_config<T>(&mut self, config_name: &str) -> Result<T>
    where
        T: Serialize + for<'de> Deserialize<'de> + Default,
    {
        let mut config_value = serde_json::to_value(T::default())?;

        let config_file_path = self.config_path(config_name);
        if config_file_path.exists() {
            let file_config = self.load_from_file(&config_file_path)?;
            Self::merge_config_values(&mut config_value, file_config, ConfigSource::File);
        }

        let env_config = self.load_from_environment(config_name);
        Self::merge_config_values(&mut config_value, env_config, ConfigSource::Environment);

        let final_config: T = serde_json::from_value(config_value.clone())
            .map_err(|e| HdkError::InvalidInput(format!("Failed to deserialize config: {}", e)))?;

        self.loaded_configs.insert(config_name.to_string(), config_value);
        Ok(final_config)
    }

    /// Save configuration to file
    pub fn save_config<T: Serialize>(&self, config_name: &str, config: &T) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }

        let config_file_path = self.config_path(config_name);
        fs::write(&config_file_path, serde_json::to_string_pretty(config)?)?;

        log::info!("Configuration '{}' saved to {:?}", config_name, config_file_path);
        Ok(())
    }

    pub fn config_exists(&self, config_name: &str) -> bool {
        self.config_path(config_name).exists()
    }

    /// The merged JSON of the last successful `load_config` for `config_name`.
    pub fn loaded(&self, config_name: &str) -> Option<&serde_json::Value> {
        self.loaded_configs.get(config_name)
    }

    fn load_from_file(&self, file_path: &Path) -> Result<serde_json::Value> {
        let content = fs::read_to_string(file_path)?;
        serde_json::from_str(&content)
            .map_err(|e| HdkError::InvalidInput(format!("Failed to parse config file: {}", e)))
    }

    fn load_from_environment(&self, config_name: &str) -> serde_json::Value {
        let mut env_config = serde_json::Map::new();
        let prefix = format!("{}_{}_", self.environment_prefix, config_name.to_uppercase());

        for (key, value) in env::vars() {
            if let Some(config_key) = key.strip_prefix(&prefix) {
                // JSON first, plain string otherwise
                let parsed_value = serde_json::from_str(&value)
                    .unwrap_or(serde_json::Value::String(value));
                env_config.insert(config_key.to_lowercase(), parsed_value);
            }
        }

        serde_json::Value::Object(env_config)
    }

    fn merge_config_values(base: &mut serde_json::Value, overlay: serde_json::Value, source: ConfigSource) {
        match (base, overlay) {
            (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
                for (key, value) in overlay_map {
                    log::trace!("Config key '{}' set from {:?}", key, source);
                    base_map.insert(key, value);
                }
            }
            (base, overlay) => {
                *base = overlay;
            }
        }
    }
}
