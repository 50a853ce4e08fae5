use std::env;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "eventboard.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Password protecting the admin endpoints.
    pub admin_password: String,
    /// Bearer token the digest cron job must present. `None` disables the check.
    pub cron_secret: Option<String>,
    /// API key for the outbound mail provider. `None` logs digests instead.
    pub resend_api_key: Option<String>,
    /// From header on digest emails.
    pub digest_from: String,
    /// Public base URL used for links in digest emails.
    pub public_base_url: String,
    /// Timezone the listings are evaluated in (default: America/Mexico_City).
    pub timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "eventboard.db")
    /// - `ADMIN_PASSWORD` - Admin password (default: "eventboard-dev")
    /// - `CRON_SECRET` - Bearer token for the digest endpoint (optional)
    /// - `RESEND_API_KEY` - Mail provider API key (optional)
    /// - `DIGEST_FROM` - From header on digest emails
    /// - `PUBLIC_BASE_URL` - Base URL for links in digest emails
    /// - `EVENTBOARD_TZ` - IANA timezone name (default: "America/Mexico_City")
    pub fn from_env() -> anyhow::Result<Self> {
        let timezone = match env::var("EVENTBOARD_TZ") {
            Ok(name) => name
                .parse::<Tz>()
                .with_context(|| format!("unknown timezone in EVENTBOARD_TZ: {name}"))?,
            Err(_) => chrono_tz::America::Mexico_City,
        };

        Ok(Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "eventboard.db".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "eventboard-dev".to_string()),
            cron_secret: env::var("CRON_SECRET").ok().filter(|s| !s.is_empty()),
            resend_api_key: env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty()),
            digest_from: env::var("DIGEST_FROM")
                .unwrap_or_else(|_| "Eventboard <digest@localhost>".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            timezone,
        })
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Current time of day in the configured timezone.
    pub fn now_time(&self) -> NaiveTime {
        Utc::now().with_timezone(&self.timezone).time()
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            sqlite_path: "eventboard-test.db".to_string(),
            admin_password: "test-password".to_string(),
            cron_secret: None,
            resend_api_key: None,
            digest_from: "Eventboard <digest@localhost>".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            timezone: chrono_tz::America::Mexico_City,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so defaults and the invalid-timezone case
    // run in one test to avoid interleaving.
    #[test]
    fn test_env_parsing() {
        env::remove_var("SQLITE_PATH");
        env::remove_var("ADMIN_PASSWORD");
        env::remove_var("CRON_SECRET");
        env::remove_var("RESEND_API_KEY");
        env::remove_var("EVENTBOARD_TZ");

        let config = Config::from_env().unwrap();
        assert_eq!(config.sqlite_path, "eventboard.db");
        assert_eq!(config.admin_password, "eventboard-dev");
        assert_eq!(config.cron_secret, None);
        assert_eq!(config.resend_api_key, None);
        assert_eq!(config.timezone, chrono_tz::America::Mexico_City);

        env::set_var("EVENTBOARD_TZ", "Not/AZone");
        let result = Config::from_env();
        env::remove_var("EVENTBOARD_TZ");
        assert!(result.is_err());
    }
}
