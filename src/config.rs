// src/config.rs
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_token: Option<String>,
    pub backend_timeout: Duration,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = get("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let backend_timeout = match get("BACKEND_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid { key: "BACKEND_TIMEOUT_SECS", value: v })?,
            None => Duration::from_secs(15),
        };

        // Bad HOST/PORT fall back to local defaults rather than refusing to start.
        let host = get("HOST")
            .and_then(|h| h.parse().ok())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        Ok(Self {
            backend_url,
            backend_token: get("BACKEND_TOKEN"),
            backend_timeout,
            jwt_secret,
            host,
            port,
            cors_origin: get("CORS_ORIGIN"),
        })
    }
}
