//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Path of the serialized classifier
    pub model_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unparseable values fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: var("MODEL_PATH")
                .unwrap_or_else(|| "models/classifier.json".to_string()),

            environment: var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Socket address to listen on
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8501);
        assert_eq!(config.model_path, "models/classifier.json");
        assert_eq!(config.addr().to_string(), "0.0.0.0:8501");
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "127.0.0.1"),
            ("PORT", "not-a-port"),
            ("MODEL_PATH", "/srv/model.json"),
            ("ENVIRONMENT", "production"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.addr().to_string(), "127.0.0.1:8501");
        assert_eq!(config.model_path, "/srv/model.json");
        assert!(config.is_production());
    }
}
