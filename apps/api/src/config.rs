use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::screening::pipeline::ScreeningOptions;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for multipart uploads.
    pub max_upload_bytes: usize,
    /// Files decoded in parallel per batch.
    pub screening_concurrency: usize,
    /// Tag blank documents `empty` instead of scoring them.
    pub flag_empty_extractions: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let screening_concurrency =
            parse_or(&lookup, "SCREENING_CONCURRENCY", default_concurrency)?;
        if screening_concurrency == 0 {
            bail!("SCREENING_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            screening_concurrency,
            flag_empty_extractions: parse_or(&lookup, "FLAG_EMPTY_EXTRACTIONS", false)?,
        })
    }

    pub fn screening_options(&self) -> ScreeningOptions {
        ScreeningOptions {
            concurrency: self.screening_concurrency,
            flag_empty: self.flag_empty_extractions,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value '{raw}' (default {default})")),
        None => Ok(default),
    }
}
