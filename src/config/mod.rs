//! Configuration management.
//!
//! Settings come from serde defaults, an optional TOML file and `PAPER_FETCHER_*`
//! environment variables, in increasing order of precedence. Nested keys use a
//! double underscore, e.g. `PAPER_FETCHER_PUBMED__BASE_URL`.
//!
//! ```toml
//! [pubmed]
//! base_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils"
//! database = "pubmed"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables read by [`load_config`] and [`get_config`]
pub const ENV_PREFIX: &str = "PAPER_FETCHER";

/// Name of the config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "paper-fetcher.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// E-utilities endpoint settings
    #[serde(default)]
    pub pubmed: PubMedConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// E-utilities endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubMedConfig {
    /// Base URL holding `esearch.fcgi` and `efetch.fcgi`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Entrez database to query
    #[serde(default = "default_database")]
    pub database: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database: default_database(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string()
}

fn default_database() -> String {
    "pubmed".to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `--debug` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-fetcher").join("config.toml"))
        .filter(|path| path.is_file())
}
