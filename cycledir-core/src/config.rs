//! cycledir configuration.
//!
//! Read from `~/.config/cycledir/config.toml`, then overridden by
//! `CYCLEDIR__*` environment variables (`CYCLEDIR__SERVER__PORT=8080`
//! sets `server.port`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CycleError, CycleResult};
use crate::settings::{CycleSettings, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH};
use crate::store::DEFAULT_CHANGE_BUFFER;
use crate::user::UserId;

static DEFAULT_DATA_DIR: &str = "~/.local/share/cycledir";
static DEFAULT_USER: &str = "local";
static DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4097;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// `[default_settings]` table; either key may be left out.
#[derive(Deserialize)]
struct DefaultSettingsTable {
    #[serde(default = "DefaultSettingsTable::cycle_length", alias = "cycleLength")]
    cycle_length: i64,

    #[serde(default = "DefaultSettingsTable::period_length", alias = "periodLength")]
    period_length: i64,
}

impl DefaultSettingsTable {
    fn cycle_length() -> i64 {
        DEFAULT_CYCLE_LENGTH
    }

    fn period_length() -> i64 {
        DEFAULT_PERIOD_LENGTH
    }
}

fn partial_settings<'de, D>(deserializer: D) -> Result<CycleSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let table = DefaultSettingsTable::deserialize(deserializer)?;
    Ok(CycleSettings::new(table.cycle_length, table.period_length))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,

    /// Changes buffered per event-stream subscriber.
    #[serde(default = "ServerConfig::default_change_buffer")]
    pub change_buffer: usize,
}

impl ServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_change_buffer() -> usize {
        DEFAULT_CHANGE_BUFFER
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: Self::default_host(),
            port: Self::default_port(),
            change_buffer: Self::default_change_buffer(),
        }
    }
}

/// Configuration at ~/.config/cycledir/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycledirConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// User the CLI reads and writes as.
    #[serde(default = "default_user")]
    pub user: String,

    /// Settings for users that have not saved their own.
    #[serde(default, deserialize_with = "partial_settings")]
    pub default_settings: CycleSettings,

    #[serde(default)]
    pub server: ServerConfig,

    /// Server log level; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CycledirConfig {
    fn default() -> Self {
        CycledirConfig {
            data_dir: default_data_dir(),
            user: default_user(),
            default_settings: CycleSettings::default(),
            server: ServerConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl CycledirConfig {
    pub fn config_path() -> CycleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CycleError::Config("Could not determine config directory".into()))?
            .join("cycledir");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config on first run.
    pub fn load() -> CycleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (if it exists) plus environment overrides.
    pub fn load_from(path: &Path) -> CycleResult<Self> {
        let config: CycledirConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("CYCLEDIR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CycleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CycleError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CycleResult<()> {
        self.default_settings
            .validate()
            .map_err(|e| CycleError::Config(format!("default_settings: {e}")))?;
        self.user_id()?;
        Ok(())
    }

    pub fn user_id(&self) -> CycleResult<UserId> {
        UserId::new(self.user.clone())
            .map_err(|e| CycleError::Config(format!("user: {e}")))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CycleResult<()> {
        let contents = format!(
            "\
# cycledir configuration

# Where period records and settings are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# User the command line reads and writes as:
# user = \"{DEFAULT_USER}\"

# Settings used until you save your own:
# [default_settings]
# cycle_length = 28
# period_length = 5

# [server]
# host = \"{DEFAULT_HOST}\"
# port = {DEFAULT_PORT}
# Changes buffered per event-stream subscriber before it must resync:
# change_buffer = {DEFAULT_CHANGE_BUFFER}

# Server log level (RUST_LOG takes precedence):
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CycleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CycleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
