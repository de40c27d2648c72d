//! Runtime settings for the monitoring helpers.
//!
//! Settings live in a small TOML file:
//!
//! ```toml
//! read_chunk_size = 4096
//! parse_bool = true
//! ```
//!
//! Every field is optional and falls back to its default. Environment
//! variables (`SYSMON_READ_CHUNK_SIZE`, `SYSMON_PARSE_BOOL`) override values
//! read from the file.

use crate::error::{Result, SysmonError};
use crate::read::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const ENV_READ_CHUNK_SIZE: &str = "SYSMON_READ_CHUNK_SIZE";
pub const ENV_PARSE_BOOL: &str = "SYSMON_PARSE_BOOL";

/// Settings consumed by [`crate::read::read_all_with`] and
/// [`crate::scalar::parse_scalar_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilConfig {
    /// Bytes requested per read when draining a socket
    pub read_chunk_size: usize,
    /// Treat yes/no and on/off fields as booleans
    pub parse_bool: bool,
}

impl Default for UtilConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_CHUNK_SIZE,
            parse_bool: false,
        }
    }
}

impl UtilConfig {
    /// Parse configuration from TOML text without applying overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SysmonError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// override is malformed, or validation fails
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SysmonError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml(&content)?;
        config.merge_env_vars()?;
        config.validate()?;

        info!("Configuration loaded successfully from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or cannot be written
    pub async fn save_to_path(&self, path: &Path) -> Result<()> {
        debug!("Saving configuration to: {}", path.display());

        self.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    SysmonError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SysmonError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write to a sibling temp file, then rename over the target
        let temp_path = path.with_extension("toml.tmp");

        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| SysmonError::Config(format!("Failed to write config file: {}", e)))?;

        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| SysmonError::Config(format!("Failed to rename config file: {}", e)))?;

        info!("Configuration saved successfully to {}", path.display());
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `read_chunk_size` is zero
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk_size == 0 {
            return Err(SysmonError::Config(
                "read_chunk_size must be greater than 0".to_string(),
            ));
        }

        debug!("Configuration validation passed");
        Ok(())
    }

    /// Merge environment variable overrides into the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Merge overrides supplied by `lookup`, keyed by environment variable name
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Merging environment variable overrides");

        if let Some(chunk_size) = lookup(ENV_READ_CHUNK_SIZE) {
            let size = chunk_size.trim().parse::<usize>().map_err(|e| {
                SysmonError::Config(format!("Invalid read chunk size in environment: {}", e))
            })?;
            debug!("Overriding read_chunk_size from environment: {}", size);
            self.read_chunk_size = size;
        }

        if let Some(parse_bool) = lookup(ENV_PARSE_BOOL) {
            let flag = parse_flag(&parse_bool).ok_or_else(|| {
                SysmonError::Config(format!(
                    "Invalid {} value '{}'. Must be one of: true, false, yes, no, on, off, 1, 0",
                    ENV_PARSE_BOOL, parse_bool
                ))
            })?;
            debug!("Overriding parse_bool from environment: {}", flag);
            self.parse_bool = flag;
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
