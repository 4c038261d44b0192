use std::str::FromStr;
use std::time::Duration;

use ambassadors_core::rate_limit::{
    RateLimitConfig, DEFAULT_MAX_REQUESTS, DEFAULT_VOTE_MAX_REQUESTS, DEFAULT_WINDOW,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When unset the server runs on in-memory repositories.
    pub database_url: Option<String>,
    /// Bearer token for `/api/admin` routes. Admin routes reject every
    /// request when unset.
    pub admin_token: Option<String>,
    /// Rate-limit window length in seconds (default: `60`).
    pub rate_limit_window_secs: u64,
    /// Requests per window across the API (default: `100`).
    pub rate_limit_max_requests: u32,
    /// Vote submissions per window (default: `10`).
    pub vote_rate_limit_max_requests: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                    |
    /// |--------------------------------|----------------------------|
    /// | `HOST`                         | `0.0.0.0`                  |
    /// | `PORT`                         | `3000`                     |
    /// | `CORS_ORIGINS`                 | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                       |
    /// | `DATABASE_URL`                 | unset                      |
    /// | `ADMIN_API_TOKEN`              | unset                      |
    /// | `RATE_LIMIT_WINDOW_SECS`       | `60`                       |
    /// | `RATE_LIMIT_MAX_REQUESTS`      | `100`                      |
    /// | `VOTE_RATE_LIMIT_MAX_REQUESTS` | `10`                       |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            database_url: non_empty_var("DATABASE_URL"),
            admin_token: non_empty_var("ADMIN_API_TOKEN"),
            rate_limit_window_secs: env_parse(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            ),
            rate_limit_max_requests: env_parse(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            ),
            vote_rate_limit_max_requests: env_parse(
                "VOTE_RATE_LIMIT_MAX_REQUESTS",
                defaults.vote_rate_limit_max_requests,
            ),
        }
    }

    fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Policy for all `/api` traffic.
    pub fn global_rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::new(self.rate_limit_window(), self.rate_limit_max_requests, "global")
    }

    /// Stricter policy for vote submissions.
    pub fn vote_rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::vote(self.rate_limit_window(), self.vote_rate_limit_max_requests)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs: 30,
            database_url: None,
            admin_token: None,
            rate_limit_window_secs: DEFAULT_WINDOW.as_secs(),
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            vote_rate_limit_max_requests: DEFAULT_VOTE_MAX_REQUESTS,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `key` if set, panicking on malformed values so misconfiguration
/// fails at startup.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_policy_is_stricter_than_global() {
        let config = ServerConfig::default();
        assert!(config.vote_rate_limit().max_requests < config.global_rate_limit().max_requests);
        assert_eq!(config.vote_rate_limit().key_prefix, "vote");
        assert_eq!(config.global_rate_limit().key_prefix, "global");
        assert_eq!(config.global_rate_limit().window, Duration::from_secs(60));
    }
}
