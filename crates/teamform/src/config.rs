//! Configuration management for teamform.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::FieldKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "teamform";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "TEAMFORM_";

/// Separator of nested keys in environment variable names.
const ENV_KEY_SEPARATOR: &str = "__";

/// Largest capacity a single list may be configured with.
pub const MAX_LIST_ENTRIES: usize = 100;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TEAMFORM_`)
/// 2. TOML config file at `~/.config/teamform/config.toml`
/// 3. Default values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The team members list.
    pub members: ListConfig,
    /// The team links list.
    pub links: ListConfig,
    /// Settings of the surrounding team form.
    pub form: FormConfig,
}

/// Configuration of one bounded list editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Upper bound on the number of entries.
    pub max_entries: usize,
    /// Display text for empty inputs.
    pub placeholder: String,
    /// Refuse to remove the only remaining entry.
    #[serde(default = "default_enforce_minimum")]
    pub enforce_minimum: bool,
}

/// Settings of the host team form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Description stored when the team leaves it blank.
    pub default_description: String,
}

fn env_provider(prefix: &str) -> Env {
    Env::prefixed(prefix).split(ENV_KEY_SEPARATOR)
}

fn default_enforce_minimum() -> bool {
    true
}

impl ListConfig {
    /// Default configuration of the members list.
    #[must_use]
    pub fn members() -> Self {
        Self {
            max_entries: 5,
            placeholder: "Full name".to_string(),
            enforce_minimum: true,
        }
    }

    /// Default configuration of the links list.
    #[must_use]
    pub fn links() -> Self {
        Self {
            max_entries: 10,
            placeholder: "Link".to_string(),
            enforce_minimum: true,
        }
    }

    /// Validate a single list configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is outside `1..=MAX_LIST_ENTRIES` or
    /// the placeholder is blank.
    pub fn validate(&self, kind: FieldKind) -> Result<()> {
        if self.max_entries == 0 {
            return Err(Error::config_validation(format!(
                "{}.max_entries must be at least 1",
                kind.list_name()
            )));
        }

        if self.max_entries > MAX_LIST_ENTRIES {
            return Err(Error::config_validation(format!(
                "{}.max_entries ({}) cannot exceed {MAX_LIST_ENTRIES}",
                kind.list_name(),
                self.max_entries
            )));
        }

        if self.placeholder.trim().is_empty() {
            return Err(Error::config_validation(format!(
                "{}.placeholder must not be empty",
                kind.list_name()
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            members: ListConfig::members(),
            links: ListConfig::links(),
            form: FormConfig::default(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_description: "The team did not provide a description".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file at `config_path`, or the default path (if exists)
    /// 3. Environment variables (prefixed with `TEAMFORM_`, nested keys split on `__`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(env_provider(ENV_PREFIX));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the configuration of the list of the given kind.
    #[must_use]
    pub fn list(&self, kind: FieldKind) -> &ListConfig {
        match kind {
            FieldKind::Member => &self.members,
            FieldKind::Link => &self.links,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for kind in FieldKind::ALL {
            self.list(kind).validate(kind)?;
        }
        Ok(())
    }
}
