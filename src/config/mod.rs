//! Configuration handling for the article and news proxy.
//!
//! Everything is read from environment variables with development defaults,
//! except the upstream search credential, which has no default and must be
//! supplied as a secret. `Config::from_env` validates numeric values and the
//! CORS origin list before the server starts.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_PORT: &str = "PORT";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_SEARCH_API_URL: &str = "SEARCH_API_URL";
pub const ENV_SEARCH_API_KEY: &str = "SEARCH_API_KEY";
pub const ENV_SEARCH_API_KEY_PARAM: &str = "SEARCH_API_KEY_PARAM";
pub const ENV_FETCH_CONNECT_TIMEOUT_SECS: &str = "FETCH_CONNECT_TIMEOUT_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_RETRIES: &str = "FETCH_MAX_RETRIES";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://localhost:5173";
const DEFAULT_SEARCH_API_URL: &str = "https://serpapi.com/search";
const DEFAULT_SEARCH_API_KEY_PARAM: &str = "api_key";
const DEFAULT_FETCH_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FETCH_MAX_RETRIES: u32 = 0;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    allowed_origins: Vec<String>,
    search_api_url: String,
    search_api_key: Option<String>,
    search_api_key_param: String,
    fetch_connect_timeout: Duration,
    fetch_timeout: Duration,
    fetch_max_retries: u32,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match env::var(ENV_PORT) {
            Ok(port) => {
                let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_PORT,
                    reason: format!("'{}' is not a valid port", port),
                })?;
                format!("0.0.0.0:{}", port)
            }
            Err(_) => env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        };

        let origins_raw = env::var(ENV_ALLOWED_ORIGINS)
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins = parse_origins(&origins_raw)?;

        let search_api_url =
            env::var(ENV_SEARCH_API_URL).unwrap_or_else(|_| DEFAULT_SEARCH_API_URL.to_string());
        Url::parse(&search_api_url).map_err(|e| ConfigError::InvalidValue {
            field: ENV_SEARCH_API_URL,
            reason: e.to_string(),
        })?;

        let search_api_key = env::var(ENV_SEARCH_API_KEY)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let search_api_key_param = env::var(ENV_SEARCH_API_KEY_PARAM)
            .unwrap_or_else(|_| DEFAULT_SEARCH_API_KEY_PARAM.to_string());

        let fetch_connect_timeout = Duration::from_secs(parse_var(
            ENV_FETCH_CONNECT_TIMEOUT_SECS,
            DEFAULT_FETCH_CONNECT_TIMEOUT_SECS,
        )?);
        let fetch_timeout =
            Duration::from_secs(parse_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?);
        let fetch_max_retries = parse_var(ENV_FETCH_MAX_RETRIES, DEFAULT_FETCH_MAX_RETRIES)?;
        let log_format = parse_var(ENV_LOG_FORMAT, LogFormat::default())?;

        Ok(Self {
            bind_addr,
            allowed_origins,
            search_api_url,
            search_api_key,
            search_api_key_param,
            fetch_connect_timeout,
            fetch_timeout,
            fetch_max_retries,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Browser origins allowed to call the API.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
    /// Upstream search endpoint the news proxy forwards to.
    pub fn search_api_url(&self) -> &str {
        &self.search_api_url
    }
    /// Credential injected into every upstream search request.
    pub fn search_api_key(&self) -> Option<&str> {
        self.search_api_key.as_deref()
    }
    /// Query parameter name carrying the credential.
    pub fn search_api_key_param(&self) -> &str {
        &self.search_api_key_param
    }
    pub fn fetch_connect_timeout(&self) -> Duration {
        self.fetch_connect_timeout
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    pub fn fetch_max_retries(&self) -> u32 {
        self.fetch_max_retries
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_api(mut self, url: impl Into<String>, key: Option<&str>) -> Self {
        self.search_api_url = url.into();
        self.search_api_key = key.map(str::to_string);
        self
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .split(',')
                .map(str::to_string)
                .collect(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            search_api_key: None,
            search_api_key_param: DEFAULT_SEARCH_API_KEY_PARAM.to_string(),
            fetch_connect_timeout: Duration::from_secs(DEFAULT_FETCH_CONNECT_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            fetch_max_retries: DEFAULT_FETCH_MAX_RETRIES,
            log_format: LogFormat::default(),
        }
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let parsed = Url::parse(origin).map_err(|e| ConfigError::InvalidValue {
                field: ENV_ALLOWED_ORIGINS,
                reason: format!("'{}': {}", origin, e),
            })?;
            // Browsers send the serialized origin without a trailing slash.
            Ok(parsed.origin().ascii_serialization())
        })
        .collect()
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
