//! Service configuration.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional `config/default` file, then `FUGLE_`-prefixed environment
//! variables. The vendor credential has no default and must be supplied.

use config::{Config, Environment, File, Map};
use serde::Deserialize;
use thiserror::Error;

pub const API_KEY_VAR: &str = "FUGLE_MARKET_DATA_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.fugle.tw/marketdata/v1.0";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const ENV_PREFIX: &str = "FUGLE";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required configuration
    #[error("Environment variable \"{0}\" not set")]
    MissingRequired(String),

    /// Underlying config crate error
    #[error("Configuration error: {0}")]
    ConfigCrateError(#[from] config::ConfigError),
}

#[derive(Clone)]
pub struct Settings {
    pub market_data_api_key: String,
    pub market_data_base_url: String,
    pub bind_addr: String,
}

// Shape read from the layered sources, before required keys are checked.
#[derive(Deserialize)]
struct RawSettings {
    market_data_api_key: Option<String>,
    market_data_base_url: String,
    bind_addr: String,
}

impl Settings {
    /// Load settings from `.env`, the optional config file and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Same layering as [`Settings::from_env`], but variables come from `vars`
    /// instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .set_default("market_data_base_url", DEFAULT_BASE_URL)?
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        let market_data_api_key = raw
            .market_data_api_key
            .ok_or_else(|| ConfigError::MissingRequired(API_KEY_VAR.to_string()))?;

        Ok(Self {
            market_data_api_key,
            market_data_base_url: raw.market_data_base_url,
            bind_addr: raw.bind_addr,
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("market_data_api_key", &"<redacted>")
            .field("market_data_base_url", &self.market_data_base_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Settings::from_vars(Vec::<(String, String)>::new()).unwrap_err();
        match err {
            ConfigError::MissingRequired(name) => assert_eq!(name, API_KEY_VAR),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let settings = Settings::from_vars([(API_KEY_VAR, "secret")]).unwrap();
        assert_eq!(settings.market_data_api_key, "secret");
        assert_eq!(settings.market_data_base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_overrides_from_vars() {
        let settings = Settings::from_vars([
            (API_KEY_VAR, "secret"),
            ("FUGLE_MARKET_DATA_BASE_URL", "http://127.0.0.1:9999"),
            ("FUGLE_BIND_ADDR", "127.0.0.1:3000"),
        ])
        .unwrap();
        assert_eq!(settings.market_data_base_url, "http://127.0.0.1:9999");
        assert_eq!(settings.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_api_key_accepted() {
        let settings = Settings::from_vars([(API_KEY_VAR, "")]).unwrap();
        assert_eq!(settings.market_data_api_key, "");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let settings = Settings::from_vars([(API_KEY_VAR, "top-secret")]).unwrap();
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("top-secret"));
    }
}
