//! Server configuration
//!
//! Every setting comes from the environment (a `.env` file is loaded first);
//! missing values fall back to development defaults.

use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use auth::config::DEV_JWT_SECRET;

pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            frontend_origins: split_list(DEFAULT_FRONTEND_ORIGINS),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().context("PORT must be a port number")?;
        }

        config.database_url = get("DATABASE_URL");

        if let Some(max) = get("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;
        }

        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(origins) = get("FRONTEND_ORIGINS") {
            config.frontend_origins = split_list(&origins);
        }

        match get("JWT_SECRET") {
            Some(secret) => config.auth.jwt_secret = secret.into_bytes(),
            None => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }

        if let Some(hours) = get("TOKEN_TTL_HOURS") {
            let hours: u64 = hours
                .trim()
                .parse()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?;
            config.auth.token_ttl = Duration::from_secs(hours * 3600);
        }

        config.auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        if let Some(codes) = get("AUTH_INVITE_CODES") {
            config.auth.invite_codes = split_list(&codes);
        }

        config.auth.verification_code = get("AUTH_VERIFICATION_CODE").map(|c| c.trim().to_owned());

        Ok(config)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET.as_bytes()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.database_url.is_none());
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(config.uses_dev_secret());
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/campus"),
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_HOURS", "2"),
            ("AUTH_INVITE_CODES", "SE2024, CAMPUS ,"),
            ("AUTH_VERIFICATION_CODE", "000000"),
            ("FRONTEND_ORIGINS", "https://campus.example.com"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/campus"));
        assert!(!config.uses_dev_secret());
        assert_eq!(config.auth.token_ttl_secs(), 7200);
        assert_eq!(config.auth.invite_codes, vec!["SE2024", "CAMPUS"]);
        assert!(config.auth.accepts_verification_code("000000"));
        assert_eq!(config.frontend_origins, vec!["https://campus.example.com"]);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
