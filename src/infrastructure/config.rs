use crate::domain::error::LogrotateError;
use crate::infrastructure::parser::DEFAULT_CONF_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_conf_file")]
    pub conf_file: PathBuf,
    #[serde(default)]
    pub backup: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Logging {
    /// `EnvFilter` directive for the configured level; unknown levels fall back to warn
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "warn",
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conf_file: default_conf_file(),
            backup: false,
            theme: default_theme(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_conf_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONF_FILE)
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lrconf").join("config.toml"))
}

pub fn load_config() -> Result<Config, LogrotateError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load `path`, falling back to defaults when it is missing or malformed
pub fn load_config_from(path: &Path) -> Result<Config, LogrotateError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn generate_config_sample() -> Result<(), LogrotateError> {
    let path = get_config_path().ok_or_else(|| {
        LogrotateError::Config("Cannot determine config directory".to_string())
    })?;

    if write_config_sample(&path)? {
        println!("Generated config file at: {}", path.display());
    } else {
        eprintln!("Config file already exists at: {}", path.display());
    }

    Ok(())
}

/// Write the default config to `path` unless a file is already there
pub fn write_config_sample(path: &Path) -> Result<bool, LogrotateError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml_content = toml::to_string_pretty(&Config::default())
        .map_err(|e| LogrotateError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| LogrotateError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(true)
}
