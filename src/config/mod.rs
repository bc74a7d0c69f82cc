// Configuration management module
// TOML settings for the cleaning pipeline and tokenizer, stored in the user's home

pub mod settings;


use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

pub use settings::{Config, ConfigError};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    Config::config_dir()
}

/// Write the effective configuration to disk, creating the file with defaults
/// if there is none yet
#[inline]
pub fn init_config<P: AsRef<Path>>(config_dir: P) -> Result<PathBuf> {
    let config = Config::load(&config_dir).context("Failed to load configuration")?;
    config.save()?;
    let path = config.config_file_path();
    eprintln!(
        "{} {}",
        style("✅ Configuration written to").green(),
        style(path.display()).dim()
    );
    Ok(path)
}

#[inline]
pub fn show_config(config: &Config) -> Result<()> {
    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    let cleaning = &config.cleaning;
    eprintln!("{}", style("Cleaning:").bold().yellow());
    eprintln!("  CSS warn limit: {}", style(cleaning.css_warn_limit).cyan());
    eprintln!(
        "  Credit threshold: {}",
        style(cleaning.credit_threshold).cyan()
    );
    eprintln!(
        "  Relocate credits: {}",
        style(cleaning.relocate_credits).cyan()
    );
    eprintln!(
        "  Normalize consistency: {}",
        style(cleaning.normalize_consistency).cyan()
    );
    eprintln!("  Jobs: {}", style(cleaning.jobs).cyan());

    let tokenizer = &config.tokenizer;
    eprintln!();
    eprintln!("{}", style("Tokenizer:").bold().yellow());
    eprintln!(
        "  Common token count: {}",
        style(tokenizer.min_counts_common_token).cyan()
    );
    eprintln!(
        "  Min subtoken size: {}",
        style(tokenizer.min_subtoken_size).cyan()
    );
    eprintln!("  Max subtokens: {}", style(tokenizer.max_subtokens).cyan());
    if tokenizer.unknown_token.is_empty() {
        eprintln!("  Unknown token: {}", style("part-of-speech tag").cyan());
    } else {
        eprintln!("  Unknown token: {}", style(&tokenizer.unknown_token).cyan());
    }

    eprintln!();
    match &config.catalog_path {
        Some(path) => eprintln!("Pattern catalog: {}", style(path.display()).cyan()),
        None => eprintln!("Pattern catalog: {}", style("built-in").cyan()),
    }
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}
