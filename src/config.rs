//! Publisher configuration
//!
//! Settings come from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `<config dir>/pwa-windows-pack/config.toml`
//! 3. The `PWA_WINDOWS_GENERATOR_URL` environment variable
//!
//! ```toml
//! generator_url = "https://example.com/msix/generatezip"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PublishError, PublishResult};
use crate::validation::is_http_url;

/// Public Windows package generator endpoint
pub const DEFAULT_GENERATOR_URL: &str =
    "https://pwabuilder-win-chromium-platform.centralus.cloudapp.azure.com/msix/generatezip";

/// Environment variable overriding the generator endpoint
pub const GENERATOR_URL_ENV: &str = "PWA_WINDOWS_GENERATOR_URL";

const CONFIG_DIR_NAME: &str = "pwa-windows-pack";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Where and how package requests are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Endpoint receiving the JSON options
    #[serde(default = "default_generator_url")]
    pub generator_url: String,
}

fn default_generator_url() -> String {
    DEFAULT_GENERATOR_URL.to_string()
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            generator_url: default_generator_url(),
        }
    }
}

impl PublisherConfig {
    /// Create a config for a specific endpoint
    pub fn new(generator_url: impl Into<String>) -> Self {
        Self {
            generator_url: generator_url.into(),
        }
    }

    /// Load config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PublishResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PublishError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse config from a TOML string
    pub fn parse(content: &str) -> PublishResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default config file location, if it exists
    pub fn find_default() -> Option<PathBuf> {
        let path = dirs::config_dir()?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Defaults with the environment override applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply the environment override on top of this config
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(GENERATOR_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!(
                    env = GENERATOR_URL_ENV,
                    url = %url,
                    "Using generator URL from environment"
                );
                self.generator_url = url.trim().to_string();
            }
        }
        self
    }

    /// Load the default config file (if any), then apply the environment
    pub fn load() -> PublishResult<Self> {
        let config = match Self::find_default() {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading publisher config");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> PublishResult<()> {
        if !is_http_url(&self.generator_url) {
            return Err(PublishError::Config(format!(
                "generator_url must be an absolute http or https URL: {}",
                self.generator_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PublisherConfig::default();
        assert_eq!(config.generator_url, DEFAULT_GENERATOR_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_uses_default() {
        let config = PublisherConfig::parse("").unwrap();
        assert_eq!(config, PublisherConfig::default());
    }

    #[test]
    fn test_parse_custom_url() {
        let config =
            PublisherConfig::parse(r#"generator_url = "http://localhost:7071/generate""#).unwrap();
        assert_eq!(config.generator_url, "http://localhost:7071/generate");
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            PublisherConfig::parse("generator_url = "),
            Err(PublishError::TomlParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_relative() {
        assert!(PublisherConfig::new("/generate").validate().is_err());
    }
}
