//! Configuration CLI command handlers

use std::path::PathBuf;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{
    Config, MIN_COMPACT_BREAKPOINT, MIN_EXPLORER_WIDTH, MIN_TICK_RATE_MS,
};
use crate::error::{FolioError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Reset { key } => handle_reset(key),
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;
    apply(&mut config, key, &value)?;
    config.save()?;

    println!("{} set to: {}", key_name(key), value_of(&config, key));
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;
    println!("{}: {}", key_name(key), value_of(&config, key));
    Ok(())
}

/// Handle resetting a configuration value
fn handle_reset(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    reset(&mut config, key);
    config.save()?;

    println!(
        "{} reset to default: {}",
        key_name(key),
        value_of(&config, key)
    );
    Ok(())
}

fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::CompactBreakpoint => "compact-breakpoint",
        ConfigKey::ExplorerWidth => "explorer-width",
        ConfigKey::TickRate => "tick-rate",
        ConfigKey::StartupDocument => "startup-document",
        ConfigKey::ContentPath => "content-path",
    }
}

/// Parse `value` and store it under `key`
pub fn apply(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::CompactBreakpoint => {
            config.compact_breakpoint = parse_number(key, value, MIN_COMPACT_BREAKPOINT)?;
        }
        ConfigKey::ExplorerWidth => {
            config.explorer_width = parse_number(key, value, MIN_EXPLORER_WIDTH)?;
        }
        ConfigKey::TickRate => {
            config.tick_rate_ms = parse_number(key, value, MIN_TICK_RATE_MS)?;
        }
        ConfigKey::StartupDocument => {
            if value.trim().is_empty() {
                return Err(FolioError::InvalidInput(
                    "startup-document cannot be empty".to_string(),
                ));
            }
            config.startup_document = value.trim().to_string();
        }
        ConfigKey::ContentPath => {
            config.content_path = Some(PathBuf::from(value));
        }
    }
    Ok(())
}

/// Restore the default for `key`
pub fn reset(config: &mut Config, key: ConfigKey) {
    let defaults = Config::default();
    match key {
        ConfigKey::CompactBreakpoint => config.compact_breakpoint = defaults.compact_breakpoint,
        ConfigKey::ExplorerWidth => config.explorer_width = defaults.explorer_width,
        ConfigKey::TickRate => config.tick_rate_ms = defaults.tick_rate_ms,
        ConfigKey::StartupDocument => config.startup_document = defaults.startup_document,
        ConfigKey::ContentPath => config.content_path = None,
    }
}

/// Current value of `key`, formatted for display
pub fn value_of(config: &Config, key: ConfigKey) -> String {
    match key {
        ConfigKey::CompactBreakpoint => config.compact_breakpoint.to_string(),
        ConfigKey::ExplorerWidth => config.explorer_width.to_string(),
        ConfigKey::TickRate => format!("{}ms", config.tick_rate_ms),
        ConfigKey::StartupDocument => config.startup_document.clone(),
        ConfigKey::ContentPath => config
            .content_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
    }
}

fn parse_number<T>(key: ConfigKey, value: &str, min: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
    let parsed: T = value.trim().parse().map_err(|_| {
        FolioError::InvalidInput(format!(
            "Invalid value '{}' for {}. Expected a whole number.",
            value,
            key_name(key)
        ))
    })?;

    if parsed < min {
        return Err(FolioError::InvalidInput(format!(
            "{} must be at least {}",
            key_name(key),
            min
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_numbers() {
        let mut config = Config::default();
        apply(&mut config, ConfigKey::CompactBreakpoint, "80").unwrap();
        apply(&mut config, ConfigKey::ExplorerWidth, " 40 ").unwrap();
        apply(&mut config, ConfigKey::TickRate, "100").unwrap();

        assert_eq!(config.compact_breakpoint, 80);
        assert_eq!(config.explorer_width, 40);
        assert_eq!(value_of(&config, ConfigKey::TickRate), "100ms");
    }

    #[test]
    fn test_apply_rejects_bad_numbers() {
        let mut config = Config::default();
        assert!(apply(&mut config, ConfigKey::ExplorerWidth, "wide").is_err());
        assert!(apply(&mut config, ConfigKey::ExplorerWidth, "4").is_err());
        assert!(apply(&mut config, ConfigKey::TickRate, "-1").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_startup_document_and_content_path() {
        let mut config = Config::default();
        assert!(apply(&mut config, ConfigKey::StartupDocument, "  ").is_err());
        apply(&mut config, ConfigKey::StartupDocument, "achievements.md").unwrap();
        apply(&mut config, ConfigKey::ContentPath, "/srv/me.toml").unwrap();

        assert_eq!(config.startup_document, "achievements.md");
        assert_eq!(value_of(&config, ConfigKey::ContentPath), "/srv/me.toml");

        reset(&mut config, ConfigKey::ContentPath);
        reset(&mut config, ConfigKey::StartupDocument);
        assert_eq!(value_of(&config, ConfigKey::ContentPath), "built-in");
        assert_eq!(config, Config::default());
    }
}
