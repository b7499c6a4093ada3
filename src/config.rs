use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::api::coingecko::CoinGeckoClient;
use crate::services::price_service::{DEFAULT_PROVIDER, DEFAULT_STALE_AFTER_SECS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set in environment or .env file")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Service configuration read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind: String,
    pub port: u16,

    // CoinGecko API
    pub coingecko_api_key: String,
    pub coingecko_base_url: String,
    /// `source` tag of records refreshed from the API
    pub provider: String,
    pub stale_after: chrono::Duration,
    /// Code served by `/prices` when none is given
    pub default_code: String,

    // Page scrape
    pub scrape_page_url: String,
    pub scrape_coin_id: String,

    pub http_timeout: Duration,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a staleness window in seconds; must be a non-negative number chrono can represent
fn parse_stale_after(raw: Option<&str>) -> Result<chrono::Duration, ConfigError> {
    const NAME: &str = "PRICE_STALE_AFTER_SECS";

    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(r) => r,
        None => return Ok(chrono::Duration::seconds(DEFAULT_STALE_AFTER_SECS)),
    };
    let invalid = |reason| ConfigError::InvalidValue {
        name: NAME,
        value: raw.to_string(),
        reason,
    };

    let secs: i64 = raw.parse().map_err(|_| invalid("not an integer"))?;
    if secs < 0 {
        return Err(invalid("must not be negative"));
    }
    chrono::Duration::try_seconds(secs).ok_or_else(|| invalid("out of range"))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_DSN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_DSN"))?;

        Ok(Self {
            database_url,
            bind: env_str("BIND_ADDR", "0.0.0.0"),
            port: env_parse("PORT", 8080),
            coingecko_api_key: env_str("COINGECKO_API_KEY", ""),
            coingecko_base_url: env_str("COINGECKO_BASE_URL", CoinGeckoClient::DEFAULT_BASE_URL),
            provider: env_str("PRICE_PROVIDER", DEFAULT_PROVIDER),
            stale_after: parse_stale_after(env::var("PRICE_STALE_AFTER_SECS").ok().as_deref())?,
            default_code: env_str("DEFAULT_CODE", "turtle-2"),
            scrape_page_url: env_str("SCRAPE_PAGE_URL", "https://www.coingecko.com/en/coins/turtle-2"),
            scrape_coin_id: env_str("SCRAPE_COIN_ID", "68717"),
            http_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", 10)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-wide, so everything touching it lives in one test.
    #[test]
    fn test_from_env() {
        env::remove_var("DATABASE_DSN");
        assert!(matches!(Config::from_env(), Err(ConfigError::Missing("DATABASE_DSN"))));

        env::set_var("DATABASE_DSN", "postgres://localhost/prices");
        env::set_var("PORT", "not-a-port");
        env::set_var("PRICE_STALE_AFTER_SECS", "60");
        env::set_var("DEFAULT_CODE", "   ");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://localhost/prices");
        assert_eq!(config.port, 8080);
        assert_eq!(config.stale_after, chrono::Duration::seconds(60));
        assert_eq!(config.default_code, "turtle-2");
        assert_eq!(config.provider, "coingecko");
        assert_eq!(config.scrape_coin_id, "68717");
        assert_eq!(config.http_timeout, Duration::from_secs(10));

        env::set_var("PRICE_STALE_AFTER_SECS", "-5");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { name: "PRICE_STALE_AFTER_SECS", .. })
        ));

        env::remove_var("DATABASE_DSN");
        env::remove_var("PORT");
        env::remove_var("PRICE_STALE_AFTER_SECS");
        env::remove_var("DEFAULT_CODE");
    }

    #[test]
    fn test_stale_after_defaults_when_unset_or_blank() {
        let default = chrono::Duration::seconds(DEFAULT_STALE_AFTER_SECS);
        assert_eq!(parse_stale_after(None).unwrap(), default);
        assert_eq!(parse_stale_after(Some("  ")).unwrap(), default);
        assert_eq!(parse_stale_after(Some("0")).unwrap(), chrono::Duration::zero());
    }

    #[test]
    fn test_stale_after_rejects_negative_huge_and_garbage() {
        for raw in ["-1", "9223372036854775807", "five"] {
            match parse_stale_after(Some(raw)) {
                Err(ConfigError::InvalidValue { name, value, .. }) => {
                    assert_eq!(name, "PRICE_STALE_AFTER_SECS");
                    assert_eq!(value, raw);
                }
                other => panic!("expected InvalidValue for {:?}, got {:?}", raw, other),
            }
        }
    }
}
