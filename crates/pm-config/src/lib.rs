//! # pm-config
//!
//! Layered configuration loading for the post-mortem generator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`POSTMORTEM_*` prefix, `__` as separator)
//! 2. Legacy `GROQ_API_KEY` / `GROQ_MODEL` environment variables
//! 3. Project-level `.postmortem/config.toml`
//! 4. User-level `~/.config/postmortem/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `POSTMORTEM_LLM__API_KEY` -> `llm.api_key`,
//! `POSTMORTEM_GENERAL__PROMPTS_DIR` -> `general.prompts_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pm_config::PmConfig;
//!
//! let config = PmConfig::load_with_dotenv().expect("config");
//! if !config.llm.is_configured() {
//!     eprintln!("set POSTMORTEM_LLM__API_KEY or GROQ_API_KEY");
//! }
//! ```

mod error;
mod general;
mod llm;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env vars read by earlier deployments, mapped onto `llm.*`.
const LEGACY_ENV: [(&str, &str); 2] = [("GROQ_API_KEY", "llm.api_key"), ("GROQ_MODEL", "llm.model")];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PmConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails
    /// [`LlmConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.llm.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".postmortem/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy unprefixed variables
        let legacy_names = LEGACY_ENV.map(|(name, _)| name);
        figment = figment.merge(Env::raw().only(&legacy_names).map(|key| {
            let path = LEGACY_ENV
                .iter()
                .find(|(name, _)| key == *name)
                .map_or(key.as_str(), |(_, path)| *path);
            path.into()
        }));

        // Layer 4: Prefixed variables (highest priority)
        figment.merge(Env::prefixed("POSTMORTEM_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("postmortem").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PmConfig::default();
        assert!(!config.llm.is_configured());
        assert!(config.general.validate_input);
        assert!(config.general.prompts_dir().is_none());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: PmConfig = PmConfig::figment().extract()?;
            assert_eq!(config.llm.model, DEFAULT_MODEL);
            assert_eq!(config.llm.max_attempts, 3);
            Ok(())
        });
    }
}
