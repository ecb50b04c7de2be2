//! `djinit config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Keys understood by `djinit config get`.
const KEYS: &[&str] = &[
    "defaults.features",
    "defaults.app_name",
    "defaults.git",
    "output.no_color",
    "output.format",
    "catalog.path",
];

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.data(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            for key in KEYS {
                output.data(&format!("{key} = {}", get_config_value(&config, key)?))?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.features" => Ok(config.defaults.features.join(",")),
        "defaults.app_name" => Ok(config.defaults.app_name.clone()),
        "defaults.git" => Ok(config.defaults.git.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "catalog.path" => Ok(config
            .catalog
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".into())),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key '{key}' (known keys: {})", KEYS.join(", ")),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
