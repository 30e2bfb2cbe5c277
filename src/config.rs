use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_or("APP_PORT", std::env::var("APP_PORT").ok(), 8080)?;
        let max_connections =
            parse_or("DB_MAX_CONNECTIONS", std::env::var("DB_MAX_CONNECTIONS").ok(), 10)?;
        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional setting; unset falls back to `default`, a bad value is an error.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value {v:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            database_url: "postgres://localhost/accounts".into(),
            host: "127.0.0.1".into(),
            port: 3000,
            max_connections: 5,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn unset_numeric_settings_use_defaults() {
        assert_eq!(parse_or::<u16>("APP_PORT", None, 8080).unwrap(), 8080);
        assert_eq!(parse_or::<u32>("DB_MAX_CONNECTIONS", None, 10).unwrap(), 10);
    }

    #[test]
    fn valid_numeric_settings_are_parsed() {
        assert_eq!(parse_or::<u32>("DB_MAX_CONNECTIONS", Some("25".into()), 10).unwrap(), 25);
    }

    #[test]
    fn invalid_numeric_settings_are_errors() {
        let err = parse_or::<u32>("DB_MAX_CONNECTIONS", Some("lots".into()), 10).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
        let err = parse_or::<u16>("APP_PORT", Some("99999".into()), 8080).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
    }
}
