//! Configuration loading and validation.

use anyhow::Context as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Process configuration, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// Groq API key.
    pub groq_api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
}

/// On-disk TOML shape.
#[derive(Debug, Deserialize)]
struct TomlConfig {
    discord: TomlDiscordConfig,
    groq: TomlGroqConfig,
}

#[derive(Debug, Deserialize)]
struct TomlDiscordConfig {
    token: String,
}

#[derive(Debug, Deserialize)]
struct TomlGroqConfig {
    api_key: String,
    model: Option<String>,
}

impl Config {
    /// Resolve the instance directory from env or default (~/.norris).
    pub fn default_instance_dir() -> PathBuf {
        std::env::var("NORRIS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|d| d.join(".norris"))
                    .unwrap_or_else(|| PathBuf::from("./.norris"))
            })
    }

    /// Load configuration from the default config file, falling back to
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_instance_dir().join("config.toml");
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::load_from_env()
        }
    }

    /// Load from a specific TOML config file.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        Self::validate(Self {
            discord_token: toml_config.discord.token,
            groq_api_key: toml_config.groq.api_key,
            model: toml_config
                .groq
                .model
                .unwrap_or_else(|| DEFAULT_MODEL.into()),
        })
    }

    /// Load from environment variables only (no config file).
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::validate(Self {
            discord_token: std::env::var("DISCORD_TOKEN").unwrap_or_default(),
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            model: std::env::var("NORRIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        })
    }

    /// Missing secrets are startup-fatal.
    fn validate(config: Self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !config.discord_token.trim().is_empty(),
            "discord token is not set (config.toml [discord].token or DISCORD_TOKEN)"
        );
        anyhow::ensure!(
            !config.groq_api_key.trim().is_empty(),
            "Groq API key is not set (config.toml [groq].api_key or GROQ_API_KEY)"
        );
        Ok(config)
    }
}
