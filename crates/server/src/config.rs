// crates/server/src/config.rs
//! Environment-driven configuration.

use crate::delivery::CallbackConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default deadline for one scrape run, in seconds.
const DEFAULT_SCRAPER_TIMEOUT_SECS: u64 = 900;

/// External scraper process configuration.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Result callback; `None` disables outbound delivery.
    pub callback: Option<CallbackConfig>,
    pub scraper: ScraperConfig,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// - `BLOGSNAP_PORT` (or `PORT`) — listen port, default 8080
    /// - `BLOGSNAP_CALLBACK_URL` + `BLOGSNAP_CALLBACK_SECRET` — result
    ///   callback; both must be set or delivery is disabled
    /// - `BLOGSNAP_SCRAPER_CMD`, `BLOGSNAP_SCRAPER_ARGS`,
    ///   `BLOGSNAP_SCRAPER_TIMEOUT_SECS` — the external scraper process
    pub fn from_env() -> Self {
        let port = parse_port(env("BLOGSNAP_PORT"), env("PORT"));
        let callback = callback_from(env("BLOGSNAP_CALLBACK_URL"), env("BLOGSNAP_CALLBACK_SECRET"));
        let scraper = ScraperConfig {
            command: env("BLOGSNAP_SCRAPER_CMD").unwrap_or_else(|| "blog-scraper".to_string()),
            args: split_args(env("BLOGSNAP_SCRAPER_ARGS")),
            timeout_secs: env("BLOGSNAP_SCRAPER_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SCRAPER_TIMEOUT_SECS),
        };
        Self {
            port,
            callback,
            scraper,
        }
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Pick the listen port from the override chain, falling back to the default.
fn parse_port(primary: Option<String>, fallback: Option<String>) -> u16 {
    primary
        .or(fallback)
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// A callback needs both the URL and the secret; half a configuration
/// counts as none.
fn callback_from(url: Option<String>, secret: Option<String>) -> Option<CallbackConfig> {
    match (url, secret) {
        (Some(url), Some(secret)) => Some(CallbackConfig { url, secret }),
        (None, None) => None,
        _ => {
            tracing::warn!("callback URL or secret missing, result delivery disabled");
            None
        }
    }
}

fn split_args(raw: Option<String>) -> Vec<String> {
    raw.map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
