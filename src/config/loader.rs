//! Configuration loader with environment variable expansion

use super::{expand_env_vars, ConfigError, HarnessConfig};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<HarnessConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text, expanding `${VAR}` placeholders first
    pub fn from_yaml(content: &str) -> Result<HarnessConfig, ConfigError> {
        let expanded = expand_env_vars(content);
        // An empty document deserializes to unit, not to a mapping.
        let config: HarnessConfig = if expanded.trim().is_empty() {
            HarnessConfig::default()
        } else {
            serde_yaml::from_str(&expanded)?
        };
        config.validate()?;
        Ok(config)
    }
}
