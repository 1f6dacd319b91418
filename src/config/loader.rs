//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve configuration from the environment.
///
/// Reads the TOML file named by `HONEYGATE_CONFIG` when set, otherwise
/// starts from defaults, then applies environment overrides:
/// - `PORT` rewrites the listener port (the reference contract)
/// - `HONEYGATE_UPSTREAM_URL` rewrites the upstream base URL
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var("HONEYGATE_CONFIG") {
        Ok(path) => load_config(Path::new(&path))?,
        Err(_) => GatewayConfig::default(),
    };

    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("PORT is not a port number: {}", port)))?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    if let Ok(url) = env::var("HONEYGATE_UPSTREAM_URL") {
        config.upstream.base_url = url;
    }

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GatewayConfig) -> Result<(), ConfigError> {
    config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::Invalid(format!(
                "listener.bind_address '{}': {}",
                config.listener.bind_address, e
            ))
        })?;

    url::Url::parse(&config.upstream.base_url).map_err(|e| {
        ConfigError::Invalid(format!(
            "upstream.base_url '{}': {}",
            config.upstream.base_url, e
        ))
    })?;

    if config.upstream.max_pages == 0 {
        return Err(ConfigError::Invalid("upstream.max_pages must be >= 1".into()));
    }
    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::Invalid("upstream.timeout_secs must be >= 1".into()));
    }

    Ok(())
}
