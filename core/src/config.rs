//! Connection settings for the catalog proxy.
//!
//! # Design
//! `ProxyConfig` is plain data with a default for every field, so callers can
//! load it from any serde format or build it with `ProxyConfig::new`. Nothing
//! here reads the environment; `HttpTransport::new` consumes the timeouts and
//! user agent, `CatalogProxy::from_config` the base address.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the catalog lives and how long to wait for it.
///
/// Every field has a default, so a partial JSON or TOML document (or `{}`)
/// deserializes into a usable config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Root of the catalog API, e.g. `http://localhost:8002/api/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout, covering connect, headers and body.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8002/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("starwars-proxy/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ProxyConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ProxyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProxyConfig::default());
        assert_eq!(config.base_url, "http://localhost:8002/api/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("starwars-proxy/"));
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let config: ProxyConfig =
            serde_json::from_str(r#"{"base_url":"http://catalog:9000/api/","timeout_secs":5}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://catalog:9000/api/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn new_keeps_default_timeouts() {
        let config = ProxyConfig::new("http://127.0.0.1:1/api");
        assert_eq!(config.base_url, "http://127.0.0.1:1/api");
        assert_eq!(config.timeout_secs, 30);
    }
}
