use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::processing::ProcessingTiming;

/// Which key-value backend holds session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File { path: PathBuf },
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub port: u16,
    pub rust_log: String,
    pub processing: ProcessingTiming,
    /// Domain under which fabricated website URLs are issued.
    pub site_domain: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            store: store_backend_from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            processing: ProcessingTiming {
                duration: millis_env("PROCESSING_DURATION_MS", 8000)?,
                tick: millis_env("PROCESSING_TICK_MS", 100)?,
                navigate_delay: millis_env("PROCESSING_NAVIGATE_DELAY_MS", 1000)?,
            },
            site_domain: std::env::var("SITE_DOMAIN")
                .unwrap_or_else(|_| "resume2website.com".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            port: 8080,
            rust_log: "info".to_string(),
            processing: ProcessingTiming::default(),
            site_domain: "resume2website.com".to_string(),
        }
    }
}

fn store_backend_from_env() -> Result<StoreBackend> {
    let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());
    parse_store_backend(
        &backend,
        std::env::var("STORE_PATH").ok(),
        std::env::var("REDIS_URL").ok(),
    )
}

fn parse_store_backend(
    backend: &str,
    path: Option<String>,
    redis_url: Option<String>,
) -> Result<StoreBackend> {
    match backend.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "file" => Ok(StoreBackend::File {
            path: path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./resume2website-store.json")),
        }),
        "redis" => Ok(StoreBackend::Redis {
            url: redis_url.context("REDIS_URL is required when STORE_BACKEND=redis")?,
        }),
        other => bail!("Unknown STORE_BACKEND '{other}' (expected memory, file or redis)"),
    }
}

fn millis_env(key: &str, default: u64) -> Result<Duration> {
    let millis = match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of milliseconds"))?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_is_default_spelling() {
        assert_eq!(
            parse_store_backend("memory", None, None).unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(
            parse_store_backend(" Memory ", None, None).unwrap(),
            StoreBackend::Memory
        );
    }

    #[test]
    fn test_file_backend_uses_default_path() {
        let backend = parse_store_backend("file", None, None).unwrap();
        assert_eq!(
            backend,
            StoreBackend::File {
                path: PathBuf::from("./resume2website-store.json")
            }
        );
    }

    #[test]
    fn test_redis_backend_requires_url() {
        assert!(parse_store_backend("redis", None, None).is_err());
        let backend =
            parse_store_backend("redis", None, Some("redis://localhost:6379".to_string()))
                .unwrap();
        assert_eq!(
            backend,
            StoreBackend::Redis {
                url: "redis://localhost:6379".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(parse_store_backend("sqlite", None, None).is_err());
    }
}
