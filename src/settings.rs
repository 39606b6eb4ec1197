use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "https://mempool.space/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the transaction fetcher.
/// Values come from built-in defaults, then an optional TOML file, then
/// `BHASH_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Settings {
    /// Loads settings from `path`; a missing file falls back to the defaults.
    pub fn from_toml(path: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("BHASH"))
            .build()?
            .try_deserialize()
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml_str, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
