//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `DJINIT__SECTION__KEY` (e.g. `DJINIT__DEFAULTS__APP_NAME`)
//! 3. `--config FILE` if given (must exist)
//! 4. `.djinit.toml` in the current directory
//! 5. The user config file, see [`AppConfig::config_path`]
//! 6. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".djinit.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Where the feature catalog comes from.
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Features used by `new` when none are given on the command line.
    pub features: Vec<String>,
    pub app_name: String,
    pub git: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            app_name: "core".into(),
            git: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `catalog.toml` and `base/`. Unset means built-in.
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(Some(Self::config_path()), Some(PathBuf::from(LOCAL_CONFIG_FILE)), config_file)
    }

    fn load_from(
        user_file: Option<PathBuf>,
        local_file: Option<PathBuf>,
        explicit_file: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        for path in user_file.iter().chain(local_file.iter()) {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit_file {
            debug!(path = %path.display(), "loading explicit config file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DJINIT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("defaults.features"),
        );

        let config = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize::<Self>()
            .context("failed to deserialize configuration")?;

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.djinit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "djinit", "djinit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(Self::local_config_path)
    }

    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_app_name_is_core() {
        assert_eq!(AppConfig::default().defaults.app_name, "core");
    }

    #[test]
    fn default_has_no_features_and_no_catalog() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.features.is_empty());
        assert!(cfg.catalog.path.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_implicit_files_give_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(
            Some(temp.path().join("nope.toml")),
            Some(temp.path().join("also-nope.toml")),
            None,
        )
        .unwrap();
        assert_eq!(cfg.defaults, Defaults::default());
    }

    #[test]
    fn explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(AppConfig::load_from(None, None, Some(&missing)).is_err());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("djinit.toml");
        fs::write(&path, "[defaults]\nfeatures = [\"drf\", \"cors\"]\n").unwrap();

        let cfg = AppConfig::load_from(None, None, Some(&path)).unwrap();
        assert_eq!(cfg.defaults.features, ["drf", "cors"]);
        assert_eq!(cfg.defaults.app_name, "core");
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.toml");
        let local = temp.path().join("local.toml");
        fs::write(&user, "[defaults]\napp_name = \"web\"\ngit = true\n").unwrap();
        fs::write(&local, "[defaults]\napp_name = \"api\"\n").unwrap();

        let cfg = AppConfig::load_from(Some(user), Some(local), None).unwrap();
        assert_eq!(cfg.defaults.app_name, "api");
        assert!(cfg.defaults.git);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
