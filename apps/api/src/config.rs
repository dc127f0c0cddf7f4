use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::jobs::scraper::ScraperSettings;

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
///
/// The Cohere API key is deliberately absent: it is supplied per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub cohere_api_url: String,
    pub webdriver_url: String,
    pub job_search_url: String,
    pub scraper_max_attempts: u32,
    pub scraper_settle_delay: Duration,
    pub scraper_implicit_wait: Duration,
    pub scraper_navigation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            host: env_or("HOST", "127.0.0.1"),
            port: parse_env("PORT", 8501)?,
            rust_log: env_or("RUST_LOG", "info"),
            chunk_size: parse_env("CHUNK_SIZE", 700)?,
            chunk_overlap: parse_env("CHUNK_OVERLAP", 200)?,
            cohere_api_url: env_or("COHERE_API_URL", crate::llm_client::COHERE_CHAT_URL),
            webdriver_url: env_or("WEBDRIVER_URL", "http://localhost:9515"),
            job_search_url: env_or("JOB_SEARCH_URL", crate::jobs::url::LINKEDIN_JOB_SEARCH_URL),
            scraper_max_attempts: parse_env("SCRAPER_MAX_ATTEMPTS", 5)?,
            scraper_settle_delay: Duration::from_secs(parse_env("SCRAPER_SETTLE_DELAY_SECS", 3)?),
            scraper_implicit_wait: Duration::from_secs(parse_env(
                "SCRAPER_IMPLICIT_WAIT_SECS",
                5,
            )?),
            scraper_navigation_timeout: Duration::from_secs(parse_env(
                "SCRAPER_NAVIGATION_TIMEOUT_SECS",
                60,
            )?),
        };

        if config.chunk_size == 0 || config.chunk_overlap >= config.chunk_size {
            bail!(
                "CHUNK_OVERLAP ({}) must be smaller than a non-zero CHUNK_SIZE ({})",
                config.chunk_overlap,
                config.chunk_size
            );
        }
        if config.scraper_max_attempts == 0 {
            bail!("SCRAPER_MAX_ATTEMPTS must be at least 1");
        }

        Ok(config)
    }

    pub fn scraper_settings(&self) -> ScraperSettings {
        ScraperSettings {
            search_url: self.job_search_url.clone(),
            max_attempts: self.scraper_max_attempts,
            settle_delay: self.scraper_settle_delay,
            implicit_wait: self.scraper_implicit_wait,
            navigation_timeout: self.scraper_navigation_timeout,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u32 = parse_env("RESUME_ANALYZER_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_ANALYZER_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_env("RESUME_ANALYZER_TEST_BAD_PORT", 8501);
        assert!(result.is_err());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("RESUME_ANALYZER_TEST_BAD_PORT"));
    }

    #[test]
    fn test_parse_env_trims_whitespace() {
        std::env::set_var("RESUME_ANALYZER_TEST_CHUNK", " 350 ");
        let value: usize = parse_env("RESUME_ANALYZER_TEST_CHUNK", 700).unwrap();
        assert_eq!(value, 350);
    }
}
