
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::PatternCatalog;
use crate::cleaning::CleaningConfig;
use crate::tokenizer::TokenizerConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
    /// User pattern catalog (TOML) layered over the built-in tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid CSS warn limit: {0} (must be between 1 and 100)")]
    InvalidCssWarnLimit(usize),
    #[error("Invalid credit threshold: {0} (must be greater than 0 and at most 1)")]
    InvalidCreditThreshold(f64),
    #[error("Invalid job count: {0} (must be between 1 and 64)")]
    InvalidJobs(usize),
    #[error("Invalid common token count: {0} (must be at least 1)")]
    InvalidMinCommonCount(usize),
    #[error("Invalid min subtoken size: {0} (must be between 1 and 12)")]
    InvalidMinSubtokenSize(usize),
    #[error("Invalid max subtokens: {0} (must be between 2 and 4)")]
    InvalidMaxSubtokens(usize),
    #[error("Pattern catalog not found: {0}")]
    MissingCatalog(PathBuf),
}

impl Config {
    /// `~/.homebrew-prep`
    #[inline]
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".homebrew-prep"))
            .or({
                #[cfg(windows)]
                {
                    dirs::data_dir().map(|data| data.join("homebrew-prep"))
                }
                #[cfg(not(windows))]
                {
                    None
                }
            })
            .ok_or(ConfigError::DirectoryError)
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join("config.toml");

        if !config_path.exists() {
            return Ok(Self {
                base_dir: config_dir.as_ref().to_path_buf(),
                ..Self::default()
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.base_dir = config_dir.as_ref().to_path_buf();

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        let config_dir = self.get_base_dir();

        fs::create_dir_all(config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = self.config_file_path();
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn get_base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[inline]
    pub fn config_file_path(&self) -> PathBuf {
        self.get_base_dir().join("config.toml")
    }

    /// Where `fit` writes the learned vocabulary unless told otherwise
    #[inline]
    pub fn vocabulary_path(&self) -> PathBuf {
        self.get_base_dir().join("vocabulary.json")
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_cleaning_config()?;
        self.validate_tokenizer_config()?;
        Ok(())
    }

    fn validate_cleaning_config(&self) -> Result<(), ConfigError> {
        let config = &self.cleaning;

        if !(1..=100).contains(&config.css_warn_limit) {
            return Err(ConfigError::InvalidCssWarnLimit(config.css_warn_limit));
        }

        if !(config.credit_threshold > 0.0 && config.credit_threshold <= 1.0) {
            return Err(ConfigError::InvalidCreditThreshold(
                config.credit_threshold,
            ));
        }

        if !(1..=64).contains(&config.jobs) {
            return Err(ConfigError::InvalidJobs(config.jobs));
        }

        Ok(())
    }

    fn validate_tokenizer_config(&self) -> Result<(), ConfigError> {
        let config = &self.tokenizer;

        if config.min_counts_common_token == 0 {
            return Err(ConfigError::InvalidMinCommonCount(
                config.min_counts_common_token,
            ));
        }

        // Two pieces must still fit under the compound length guard
        if !(1..=12).contains(&config.min_subtoken_size) {
            return Err(ConfigError::InvalidMinSubtokenSize(
                config.min_subtoken_size,
            ));
        }

        if !(2..=4).contains(&config.max_subtokens) {
            return Err(ConfigError::InvalidMaxSubtokens(config.max_subtokens));
        }

        Ok(())
    }

    /// Built-in pattern catalog, extended by the configured catalog file
    #[inline]
    pub fn catalog(&self) -> crate::Result<PatternCatalog> {
        match &self.catalog_path {
            Some(path) if !path.exists() => Err(ConfigError::MissingCatalog(path.clone()).into()),
            Some(path) => PatternCatalog::load(Some(path)),
            None => PatternCatalog::load(None::<&Path>),
        }
    }
}
