//! Config module contains the top-level config for the client.

use config_crate::{Config as RawConfig, ConfigError, Environment, File};
use std::env;

/// Gateway account and http client settings
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub payture: Payture,
    pub client: Client,
}

/// Gateway account settings, every missing field falls back to the sandbox defaults
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Payture {
    pub host: Option<String>,
    pub merchant: Option<String>,
    pub return_url: Option<String>,
    pub cheque_contact_email: Option<String>,
    pub widget_host: Option<String>,
    pub widget_domain: Option<String>,
}

/// Http client settings
#[derive(Debug, Deserialize, Clone)]
pub struct Client {
    pub http_client_buffer_size: usize,
    pub max_redirects: usize,
    pub dns_worker_thread_count: usize,
}

impl Config {
    /// Creates config from base.toml, which is overwritten by <env>.toml, where env is taken
    /// from `RUN_MODE` (`development` by default). After that values can be overwritten by
    /// env variables prefixed with `PAYTURE`.
    pub fn new() -> Result<Self, ConfigError> {
        let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Config::with_env(env)
    }

    pub fn with_env(env: impl Into<String>) -> Result<Self, ConfigError> {
        let mut s = RawConfig::new();

        s.merge(File::with_name("config/base"))?;
        // Note that this file is _optional_
        s.merge(File::with_name(&format!("config/{}", env.into())).required(false))?;
        s.merge(Environment::with_prefix("PAYTURE"))?;

        s.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_base_config() {
        let config = Config::with_env("test").unwrap();

        assert_eq!(config.payture.host, Some("https://sandbox.payture.com".to_string()));
        assert_eq!(config.payture.widget_domain, Some("2".to_string()));
        assert_eq!(config.client.max_redirects, 5);
    }
}
