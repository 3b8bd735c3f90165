//! Configuration management following XDG Base Directory specification.

mod motd;
mod wrap;

pub use motd::MotdConfig;
pub use wrap::WrapConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name for XDG directories.
const APP_NAME: &str = "term-motd";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub wrap: WrapConfig,
    pub motd: MotdConfig,
}

/// Get the XDG config directory for this application.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

/// Get the path to the config file.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("term-motd.toml"))
}

/// Load configuration from the XDG location, or return defaults if not found.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

/// Load configuration from a specific path.
///
/// Falls back to defaults with a warning if the file is missing or invalid.
pub fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        log::warn!("Config file not found: {:?}", path);
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid config file {:?}: {}", path, e);
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read config file: {}", e);
            Config::default()
        }
    }
}

/// Generate default configuration as a TOML string with comments.
pub fn generate_default_config() -> anyhow::Result<String> {
    let toml_content = toml::to_string_pretty(&Config::default())?;

    let header = r#"# term-motd configuration file
#
# Command line options take precedence over the values below.

"#;

    Ok(format!("{}{}", header, toml_content))
}

/// Initialize a default configuration file at the XDG config location.
///
/// Returns the path where the config was written.
pub fn init_config(force: bool) -> anyhow::Result<PathBuf> {
    let config_path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    write_default_config(&config_path, force)?;
    Ok(config_path)
}

/// Write the default configuration to `path`, refusing to overwrite unless `force`.
fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_default_config()?)?;
    Ok(())
}

/// Schema generation for configuration.
pub mod schema {
    use super::Config;
    use schemars::schema_for;

    /// Generate JSON schema for the configuration.
    pub fn generate_schema() -> serde_json::Result<String> {
        let schema = schema_for!(Config);
        serde_json::to_string_pretty(&schema)
    }
}
