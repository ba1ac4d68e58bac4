//! Environment-driven configuration.

use std::env;
use std::time::Duration;

use crate::error::Error;
use crate::provider::GeminiConfig;
use crate::retry::RetryPolicy;
use crate::Result;

/// Service configuration, resolved once at startup.
///
/// `GEMINI_API_KEY` is the only required setting; everything else has a
/// default and an env override. Malformed overrides fall back to the
/// default rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    /// TTL stamped on cached lookups. Default 24 hours.
    pub cache_ttl: Duration,
    /// How often the background sweep evicts expired entries. Default 1 hour.
    pub sweep_interval: Duration,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            Error::Configuration("GEMINI_API_KEY is not set in the environment".to_string())
        })?;

        let retry = RetryPolicy::new(
            env_parse("VOCAB_MAX_RETRIES", 3),
            Duration::from_millis(env_parse("VOCAB_RETRY_BASE_DELAY_MS", 1000)),
        );

        Ok(Self {
            gemini: GeminiConfig::new(api_key),
            cache_ttl: Duration::from_secs(env_parse("VOCAB_CACHE_TTL_SECS", 24 * 60 * 60)),
            sweep_interval: Duration::from_secs(env_parse("VOCAB_SWEEP_INTERVAL_SECS", 60 * 60)),
            retry,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
