//! Configuration module
//!
//! Settings for the hosted backend connection and for interpreting event dates,
//! read from environment variables (and a `.env` file when present).

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono_tz::Tz;
use url::Url;

const DEFAULT_EVENTS_TABLE: &str = "events";
const DEFAULT_TIMEZONE: &str = "UTC";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`
    pub backend_url: String,
    /// Public (anon) API key sent with every request
    pub backend_key: String,
    pub events_table: String,
    /// Zone in which form dates and times are interpreted
    pub timezone: Tz,
    pub request_timeout_secs: u64,
    pub environment: String,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from a dotenv file; process environment variables fill in keys the
    /// file does not set.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to read env file {}", path.display()))?
        {
            let (key, value) =
                item.with_context(|| format!("Invalid line in env file {}", path.display()))?;
            vars.insert(key, value);
        }

        Self::from_lookup(|key| vars.get(key).cloned().or_else(|| env::var(key).ok()))
    }

    /// Build from an arbitrary variable source and validate the result.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let timezone_name =
            lookup("CODEMEET_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name.trim().parse::<Tz>().map_err(|_| {
            anyhow::anyhow!(
                "CODEMEET_TIMEZONE must be an IANA timezone name, got '{}'",
                timezone_name
            )
        })?;

        let config = Config {
            backend_url: lookup("CODEMEET_BACKEND_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .ok_or_else(|| anyhow::anyhow!("CODEMEET_BACKEND_URL must be set"))?,
            backend_key: lookup("CODEMEET_BACKEND_KEY")
                .ok_or_else(|| anyhow::anyhow!("CODEMEET_BACKEND_KEY must be set"))?,
            events_table: lookup("CODEMEET_EVENTS_TABLE")
                .unwrap_or_else(|| DEFAULT_EVENTS_TABLE.to_string()),
            timezone,
            request_timeout_secs: lookup("CODEMEET_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("CODEMEET_REQUEST_TIMEOUT_SECS must be a valid number")
                })?,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let url = Url::parse(&self.backend_url)
            .map_err(|e| anyhow::anyhow!("CODEMEET_BACKEND_URL must be a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "CODEMEET_BACKEND_URL must use http or https"
            ));
        }

        if self.is_production() && url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "CODEMEET_BACKEND_URL must use https in production"
            ));
        }

        if self.backend_key.trim().is_empty() {
            return Err(anyhow::anyhow!("CODEMEET_BACKEND_KEY cannot be empty"));
        }

        let table_name_ok = !self.events_table.is_empty()
            && self
                .events_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !table_name_ok {
            return Err(anyhow::anyhow!(
                "CODEMEET_EVENTS_TABLE must contain only letters, digits and underscores"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "CODEMEET_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
