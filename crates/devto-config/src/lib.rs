use devto_core::{DevtoError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

mod env_substitution;

pub use env_substitution::substitute_env_vars;

/// Environment variable holding the Forem API key.
pub const API_KEY_ENV: &str = "DEV_TO_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DevtoError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let expanded = substitute_env_vars(yaml)?;

        let mut config: ServerConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| DevtoError::Config(format!("Failed to parse YAML: {}", e)))?;

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// An empty api_key entry (e.g. `${DEV_TO_API_KEY:-}` with the variable
    /// unset) means "no key", not "the empty key".
    fn normalize(&mut self) {
        if let Some(key) = &self.api.api_key {
            if key.trim().is_empty() {
                self.api.api_key = None;
            }
        }
        if self.api.api_key.is_none() {
            self.api.api_key = env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.name.is_empty() {
            return Err(DevtoError::Config("Server name cannot be empty".into()));
        }
        if self.api.base_url.is_empty() {
            return Err(DevtoError::Config("API base URL cannot be empty".into()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(DevtoError::Config(
                "API base URL must start with http:// or https://".into(),
            ));
        }
        if self.api.timeout_seconds == 0 {
            return Err(DevtoError::Config("API timeout must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mut config = Self {
            server: ServerSettings::default(),
            api: ApiSettings::default(),
        };
        config.normalize();
        config
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
        }
    }
}

fn default_server_name() -> String {
    "devto-mcp-server".to_string()
}

fn default_base_url() -> String {
    "https://dev.to/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}
