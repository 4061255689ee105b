//! Server configuration (environment-driven).

use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl ApiConfig {
    /// Read `SKUFORGE_BIND_ADDR`, falling back to [`DEFAULT_BIND_ADDR`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("SKUFORGE_BIND_ADDR") {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "SKUFORGE_BIND_ADDR is not a socket address; using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_address() {
        assert_eq!(ApiConfig::default().bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn bind_addr_is_read_from_lookup() {
        let config = ApiConfig::from_lookup(|key| {
            (key == "SKUFORGE_BIND_ADDR").then(|| "127.0.0.1:3000".to_string())
        });
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    }

    #[test]
    fn unparseable_bind_addr_falls_back() {
        let config = ApiConfig::from_lookup(|_| Some("localhost".to_string()));
        assert_eq!(config, ApiConfig::default());
    }
}
