use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use hangman_persistence::connection::DEFAULT_DATABASE_URL;

pub const DEFAULT_LEADERBOARD_URL: &str = "http://localhost:3333";
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub leaderboard_url: String,
    pub database_url: String,
    pub request_timeout_seconds: u64,
    pub words_file: Option<String>,
    pub lookup_base_url: String,
    pub lookup_version: String,
    pub lookup_locale: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout = var("REQUEST_TIMEOUT_SECONDS", "10");
        let request_timeout_seconds = timeout
            .trim()
            .parse()
            .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECONDS: {:?}", timeout))?;

        Ok(Self {
            leaderboard_url: var("LEADERBOARD_URL", DEFAULT_LEADERBOARD_URL),
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            request_timeout_seconds,
            words_file: lookup("WORDS_FILE").filter(|path| !path.trim().is_empty()),
            lookup_base_url: var("LOOKUP_BASE_URL", DEFAULT_LOOKUP_BASE_URL),
            lookup_version: var("LOOKUP_VERSION", "14.1.1"),
            lookup_locale: var("LOOKUP_LOCALE", "pt_BR"),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leaderboard_url: DEFAULT_LEADERBOARD_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            request_timeout_seconds: 10,
            words_file: None,
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            lookup_version: "14.1.1".to_string(),
            lookup_locale: "pt_BR".to_string(),
        }
    }
}
