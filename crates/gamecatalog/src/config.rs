use std::{env, path::PathBuf, time::Duration};

use gamecatalog_core::notify::Trigger;

const DEFAULT_TRIGGER: &str = "weekly:mon@09:00";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cached list lifetime in seconds, 0 disables expiry (default: 3600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "gamecatalog.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://127.0.0.1:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// HS256 signing key for access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 3600)
    pub jwt_ttl_seconds: u64,
    /// When the release newsletter fires. `None` disables the scheduler.
    pub notifier_trigger: Option<Trigger>,
    /// Sender address of outgoing emails
    pub mail_from: String,
    /// HTTP mail relay endpoint. Emails are only logged when unset.
    pub mail_relay_url: Option<String>,
    /// Directory receiving uploaded cover images
    pub cover_dir: PathBuf,
    /// Load the demo catalog when the store is empty (default: true)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "gamecatalog.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://127.0.0.1:6379")
    /// - `JWT_SECRET` - Token signing key (default: "dev-secret-change-me")
    /// - `JWT_TTL_SECONDS` - Token lifetime (default: 3600)
    /// - `NOTIFIER_TRIGGER` - `every:<n>[s|m|h]`, `weekly:<day>@HH:MM` or `off`
    ///   (default: "weekly:mon@09:00")
    /// - `MAIL_FROM` - Sender address (default: "no-reply@videogames.com")
    /// - `MAIL_RELAY_URL` - Mail relay endpoint (default: unset)
    /// - `COVER_DIR` - Cover upload directory (default: "public/images/covers")
    /// - `SEED_DEMO_DATA` - Seed fixtures into an empty store (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let trigger = lookup("NOTIFIER_TRIGGER").unwrap_or_else(|| DEFAULT_TRIGGER.to_string());

        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "gamecatalog.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            jwt_secret: lookup("JWT_SECRET")
                .unwrap_or_else(|| "dev-secret-change-me".to_string()),
            jwt_ttl_seconds: lookup("JWT_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600),
            notifier_trigger: parse_trigger(&trigger),
            mail_from: lookup("MAIL_FROM")
                .unwrap_or_else(|| "no-reply@videogames.com".to_string()),
            mail_relay_url: lookup("MAIL_RELAY_URL").filter(|v| !v.trim().is_empty()),
            cover_dir: lookup("COVER_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/images/covers")),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
        }
    }

    /// Get cache TTL as a Duration. Zero means entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }

    /// Get the token lifetime.
    pub fn jwt_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.jwt_ttl_seconds).unwrap_or(i64::MAX / 1_000))
    }
}

/// `off` disables the scheduler; unparsable values fall back to the default slot.
fn parse_trigger(raw: &str) -> Option<Trigger> {
    if raw.trim().eq_ignore_ascii_case("off") {
        return None;
    }
    match raw.parse() {
        Ok(trigger) => Some(trigger),
        Err(err) => {
            tracing::warn!(error = %err, "Invalid NOTIFIER_TRIGGER, using {DEFAULT_TRIGGER}");
            DEFAULT_TRIGGER.parse().ok()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
