use simple_error::{SimpleError, SimpleResult};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://fog-backend-iyhz.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_SPEC: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub timeout: Duration,
    /// flexi_logger spec, overridden by `RUST_LOG` when set
    pub log_spec: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_spec: DEFAULT_LOG_SPEC.to_string(),
        }
    }
}

impl Config {
    /// Read `API_BASE_URL`, `PODCAST_FETCH_TIMEOUT_SECS` and `PODCAST_LOG`.
    pub fn from_env() -> SimpleResult<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> SimpleResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        let set = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = set("API_BASE_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SimpleError::new(format!("API_BASE_URL is not an http url: {}", url)));
            }
            cfg.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = set("PODCAST_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| SimpleError::new(format!("PODCAST_FETCH_TIMEOUT_SECS is not a number: {}", secs)))?;
            if secs == 0 {
                return Err(SimpleError::new("PODCAST_FETCH_TIMEOUT_SECS must be positive"));
            }
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(spec) = set("PODCAST_LOG") {
            cfg.log_spec = spec;
        }
        Ok(cfg)
    }
}
