//! # Database Connection Management
//!
//! Connection configuration for PostgreSQL (production) and SQLite (tests and
//! local runs). Configuration comes either from a full URL or from discrete
//! host/port/credential settings.

use std::{str::FromStr, time::Duration};

use ::error::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Full connection URL; takes precedence over the discrete settings.
pub const DATABASE_URL_ENV: &str = "OKR_DATABASE_URL";
pub const DATABASE_HOST_ENV: &str = "OKR_DATABASE_HOST";
pub const DATABASE_PORT_ENV: &str = "OKR_DATABASE_PORT";
pub const DATABASE_NAME_ENV: &str = "OKR_DATABASE_NAME";
pub const DATABASE_USER_ENV: &str = "OKR_DATABASE_USER";
pub const DATABASE_PASSWORD_ENV: &str = "OKR_DATABASE_PASSWORD";
pub const DATABASE_SSL_MODE_ENV: &str = "OKR_DATABASE_SSL_MODE";
pub const DATABASE_POOL_SIZE_ENV: &str = "OKR_DATABASE_POOL_SIZE";

const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Complete connection URL, overriding the fields below
    pub url:             Option<String>,
    /// Database host address
    pub host:            String,
    /// Database port number
    pub port:            u16,
    /// Database name
    pub database:        String,
    /// Database username
    pub username:        String,
    /// Database password
    pub password:        String,
    /// SSL mode for connection
    pub ssl_mode:        SslMode,
    /// Maximum connections in pool
    pub pool_size:       u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

/// SSL mode options for PostgreSQL connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No SSL - only use for development
    Disable,
    /// Prefer SSL if available
    #[default]
    Prefer,
    /// Require SSL connection
    Require,
    /// Verify SSL certificate
    VerifyCa,
    /// Verify full SSL certificate chain
    VerifyFull,
}

impl SslMode {
    /// Converts the SSL mode to a PostgreSQL connection string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(AppError::config(format!("Invalid SSL mode: {}", other))),
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            url:             None,
            host:            "localhost".to_string(),
            port:            5432,
            database:        "okr_tracker".to_string(),
            username:        "okr".to_string(),
            password:        String::new(),
            ssl_mode:        SslMode::Prefer,
            pool_size:       10,
            connect_timeout: 30,
        }
    }

    /// Configuration for a private in-memory SQLite database.
    #[must_use]
    pub fn sqlite_memory() -> Self { Self::new().with_url(SQLITE_MEMORY_URL).with_pool_size(1) }

    /// Uses a complete connection URL instead of the discrete settings
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Sets the database host
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Sets the database port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name
    #[must_use]
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Sets the database username
    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    /// Sets the database password
    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Sets the SSL mode
    #[must_use]
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Sets the connection pool size
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    /// Sets the connection timeout in seconds
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: u64) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn is_sqlite_memory(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|u| u.starts_with("sqlite::memory:") || u.contains("mode=memory"))
    }

    /// Builds the connection string
    ///
    /// Returns the explicit URL when set, otherwise a PostgreSQL URL with
    /// percent-encoded credentials.
    #[must_use]
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            percent_encode_userinfo(&self.username),
            percent_encode_userinfo(&self.password),
            self.host,
            self.port,
            self.database,
            self.ssl_mode.as_str()
        )
    }

    /// Connection string safe for logs (password replaced).
    #[must_use]
    pub fn redacted_connection_string(&self) -> String {
        match &self.url {
            Some(url) => redact_url(url),
            None => {
                format!(
                    "postgres://{}:***@{}:{}/{}?sslmode={}",
                    percent_encode_userinfo(&self.username),
                    self.host,
                    self.port,
                    self.database,
                    self.ssl_mode.as_str()
                )
            },
        }
    }

    /// Connection pool options derived from this configuration
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.connection_string());
        options
            .max_connections(self.pool_size)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .sqlx_logging(false);

        // Every pooled connection to `sqlite::memory:` is a separate database
        if self.is_sqlite_memory() {
            options.max_connections(1).min_connections(1);
        }
        options
    }

    /// Creates a database connection from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(&self) -> Result<DatabaseConnection, AppError> {
        tracing::debug!(url = %self.redacted_connection_string(), pool_size = self.pool_size, "Connecting to database");
        Database::connect(self.connect_options())
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self { Self::new() }
}

/// Percent-encoding for username/password in connection URIs.
///
/// Everything except RFC 3986 unreserved characters is encoded byte by byte.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(byte as char);
        }
        else {
            result.push('%');
            result.push(HEX[(byte >> 4) as usize] as char);
            result.push(HEX[(byte & 0x0F) as usize] as char);
        }
    }
    result
}

fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://")
    else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, host)
        },
        None => url.to_string(),
    }
}

/// Loads database configuration from environment variables
///
/// `OKR_DATABASE_URL` wins when present. Otherwise the URL is assembled from
/// `OKR_DATABASE_HOST` (localhost), `OKR_DATABASE_PORT` (5432),
/// `OKR_DATABASE_NAME` (okr_tracker), `OKR_DATABASE_USER` (okr),
/// `OKR_DATABASE_PASSWORD` (empty) and `OKR_DATABASE_SSL_MODE` (prefer).
/// `OKR_DATABASE_POOL_SIZE` (10) applies in both cases.
///
/// # Errors
///
/// Returns a config error when a numeric or enumerated value cannot be parsed.
pub fn load_config_from_env() -> Result<DatabaseConfig, AppError> {
    let get_env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    let mut config = DatabaseConfig::new();

    if let Some(pool_size) = get_env(DATABASE_POOL_SIZE_ENV) {
        let pool_size = pool_size
            .parse::<u32>()
            .map_err(|_| AppError::config(format!("Invalid pool size: {}", pool_size)))?;
        config = config.with_pool_size(pool_size);
    }

    if let Some(url) = get_env(DATABASE_URL_ENV) {
        return Ok(config.with_url(&url));
    }

    if let Some(host) = get_env(DATABASE_HOST_ENV) {
        config = config.with_host(&host);
    }
    if let Some(port) = get_env(DATABASE_PORT_ENV) {
        let port = port
            .parse::<u16>()
            .map_err(|_| AppError::config(format!("Invalid port number: {}", port)))?;
        config = config.with_port(port);
    }
    if let Some(name) = get_env(DATABASE_NAME_ENV) {
        config = config.with_database(&name);
    }
    if let Some(user) = get_env(DATABASE_USER_ENV) {
        config = config.with_username(&user);
    }
    if let Ok(password) = std::env::var(DATABASE_PASSWORD_ENV) {
        config = config.with_password(&password);
    }
    if let Some(ssl_mode) = get_env(DATABASE_SSL_MODE_ENV) {
        config = config.with_ssl_mode(ssl_mode.parse()?);
    }

    Ok(config)
}
