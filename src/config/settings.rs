//! Configuration settings management
//!
//! This module handles loading the `pstore` settings from multiple sources,
//! validation, and persistence.

use crate::error::{PropstoreError, Result};
use crate::store::ParseOptions;
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables overriding settings
pub const ENV_PREFIX: &str = "PROPSTORE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    pub properties_file: Option<PathBuf>,
    pub comment_prefixes: Vec<String>,
    pub trim_whitespace: bool,
    pub preload_system_modules: bool,
    pub output_json: bool,
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let parse_options = ParseOptions::default();

        Self {
            debug: false,
            properties_file: None,
            comment_prefixes: parse_options.comment_prefixes,
            trim_whitespace: parse_options.trim_whitespace,
            preload_system_modules: true,
            output_json: false,
            no_color: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.comment_prefixes.iter().any(|prefix| prefix.contains('=')) {
            return Err(PropstoreError::config(
                "Comment prefixes cannot contain '='",
            ));
        }

        Ok(())
    }

    /// Properties file to import, or an error if none is configured
    pub fn require_properties_file(&self) -> Result<&Path> {
        self.properties_file.as_deref().ok_or_else(|| {
            PropstoreError::config(
                "No properties file specified. Use --file, set PROPSTORE_PROPERTIES_FILE, or configure properties_file",
            )
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            comment_prefixes: self.comment_prefixes.clone(),
            trim_whitespace: self.trim_whitespace,
        }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        // Use XDG Base Directory specification on Linux and macOS
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| PropstoreError::config("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join("propstore").join("propstore.toml"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| PropstoreError::config("Unable to determine config directory"))?;
            Ok(config_dir.join("propstore").join("propstore.toml"))
        }
    }
}

/// Load settings with priority order:
/// 1. Command-line flags (applied by the caller)
/// 2. Environment variables
/// 3. Settings file
/// 4. Default values
pub fn load_settings() -> Result<Settings> {
    let path = Settings::get_config_path()?;
    let settings = load_settings_from(&path, true)?;

    settings.validate()?;

    Ok(settings)
}

/// Load settings from `path`, optionally layering `PROPSTORE_*` variables on top.
/// A missing file yields the defaults.
pub fn load_settings_from(path: &Path, include_env: bool) -> Result<Settings> {
    let mut builder = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false));

    if include_env {
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("comment_prefixes"),
        );
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    Ok(settings)
}

pub async fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(settings)?;
    tokio::fs::write(path, contents).await?;

    Ok(())
}

/// Write the default settings file unless one already exists
pub async fn init_default_settings(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    save_settings(&Settings::default(), path).await?;

    Ok(true)
}
