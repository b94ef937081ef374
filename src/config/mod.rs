use crate::agent::agent_loop::DEFAULT_MAX_ITERATIONS;
use crate::errors::OxiagentError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Environment variables consulted for the API key, in precedence order.
const API_KEY_ENV_VARS: [&str; 2] = ["OXIAGENT_API_KEY", "OPENAI_API_KEY"];

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "oxiagent.toml";

/// Model provider connection settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Override the chat-completions endpoint (OpenAI-compatible hosts).
    pub base_url: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "[empty]"
                } else {
                    "[REDACTED]"
                },
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Agent loop defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
}

impl Config {
    /// Load configuration: an explicit path must exist; otherwise
    /// `oxiagent.toml` in the working directory is used when present, and
    /// defaults apply when it is not. Environment overrides are applied
    /// last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config TOML from {}", path.display()))
    }

    /// Environment beats file: `OXIAGENT_API_KEY` (then `OPENAI_API_KEY`)
    /// for the key, `OXIAGENT_MODEL` for the model.
    pub fn apply_env_overrides(&mut self) {
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var)
                && !key.is_empty()
            {
                self.provider.api_key = key;
                break;
            }
        }
        if let Ok(model) = std::env::var("OXIAGENT_MODEL")
            && !model.is_empty()
        {
            self.provider.model = model;
        }
    }

    /// A networked run cannot start without credentials.
    pub fn validate(&self) -> Result<(), OxiagentError> {
        if self.provider.api_key.is_empty() {
            return Err(OxiagentError::Config(
                "no API key configured (set OXIAGENT_API_KEY or OPENAI_API_KEY)".to_string(),
            ));
        }
        Ok(())
    }
}
