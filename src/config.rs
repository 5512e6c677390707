/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, auth key, CORS allowlist, ...)
 * - Validate them up front so a misconfigured process fails at startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the access-token public key comes from.
///
/// The inline PEM wins when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySource {
    Pem(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,

    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    pub access_jwt_public_key: PublicKeySource,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub auth_cookie_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections: u32 = parse_or("DATABASE_MAX_CONNECTIONS", 10)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }
        let database_acquire_timeout =
            Duration::from_secs(parse_or("DATABASE_ACQUIRE_TIMEOUT_SECONDS", 5)?);

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let request_timeout = Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECONDS", 30)?);
        let request_body_limit_bytes: usize = parse_or("REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        let access_jwt_public_key = match (
            non_empty_var("ACCESS_JWT_PUBLIC_KEY_PEM"),
            non_empty_var("ACCESS_JWT_PUBLIC_KEY_PATH"),
        ) {
            (Some(pem), _) => PublicKeySource::Pem(pem.replace("\\n", "\n")),
            (None, Some(path)) => PublicKeySource::File(PathBuf::from(path)),
            (None, None) => return Err(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM")),
        };

        let auth_issuer = non_empty_var("AUTH_ISSUER");
        let auth_audience = non_empty_var("AUTH_AUDIENCE");
        let access_token_leeway_seconds: u64 = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let auth_cookie_name =
            non_empty_var("AUTH_COOKIE_NAME").unwrap_or_else(|| "access_token".to_string());
        if auth_cookie_name.contains([';', '=', ' ']) {
            return Err(ConfigError::Invalid("AUTH_COOKIE_NAME"));
        }

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            database_acquire_timeout,
            cors_allowed_origins,
            request_timeout,
            request_body_limit_bytes,
            access_jwt_public_key,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            auth_cookie_name,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with the fixture public key, for unit tests of config consumers.
    pub(crate) fn for_tests(app_env: AppEnv) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env,
            database_url: "postgres://localhost/unused".to_string(),
            database_max_connections: 1,
            database_acquire_timeout: Duration::from_secs(1),
            cors_allowed_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
            request_body_limit_bytes: 1024 * 1024,
            access_jwt_public_key: PublicKeySource::Pem(
                include_str!("../tests/fixtures/access_public.pem").to_string(),
            ),
            auth_issuer: None,
            auth_audience: None,
            access_token_leeway_seconds: 60,
            auth_cookie_name: "access_token".to_string(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Unset keeps the default; set-but-unparsable is a startup error.
fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
