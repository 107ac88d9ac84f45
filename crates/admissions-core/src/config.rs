//! Configuration module
//!
//! Both services read their settings from the environment (a `.env` file is loaded first
//! when present). `BaseConfig` holds what the two binaries share; `StoreServiceConfig`
//! and `GatewayConfig` add their own settings on top.

use std::env;
use std::path::PathBuf;

// Common constants
const STORE_PORT: u16 = 3001;
const GATEWAY_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const STORE_MAX_BODY_BYTES: usize = 1024 * 1024;
const GATEWAY_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;
const STORE_SERVICE_URL: &str = "http://application-service:3001";
const STORE_SERVICE_TIMEOUT_SECS: u64 = 30;
const UPLOAD_DIR: &str = "public/uploads";
const UPLOAD_PUBLIC_PREFIX: &str = "/uploads";

/// Output format of the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Base configuration shared by both services
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
}

impl BaseConfig {
    /// Read the shared settings. `port_var` is the service-specific port variable; the
    /// generic `PORT` is used when it is unset.
    fn from_env(port_var: &str, default_port: u16) -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var(port_var)
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| default_port.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid port number", port_var))?;

        Ok(Self {
            server_port,
            cors_origins,
            environment,
            log_format: LogFormat::from_env_value(&env::var("LOG_FORMAT").unwrap_or_default()),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// `true` when any origin may call the service.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.allows_any_origin() {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }
}

/// Application Store Service configuration
#[derive(Clone, Debug)]
pub struct StoreServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_body_bytes: usize,
}

impl StoreServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Self {
            base: BaseConfig::from_env("STORE_PORT", STORE_PORT)?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_body_bytes: env::var("STORE_MAX_BODY_BYTES")
                .unwrap_or_else(|_| STORE_MAX_BODY_BYTES.to_string())
                .parse()
                .unwrap_or(STORE_MAX_BODY_BYTES),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.base.validate()?;

        if !(self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        if self.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS must be greater than 0"));
        }

        if self.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("STORE_MAX_BODY_BYTES must be greater than 0"));
        }

        Ok(())
    }
}

/// Submission Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base: BaseConfig,
    /// Base URL of the Application Store Service, without trailing slash.
    pub store_service_url: String,
    pub store_service_timeout_secs: u64,
    /// Directory uploaded files are written to.
    pub upload_dir: PathBuf,
    /// URL path under which `upload_dir` is served, e.g. `/uploads`.
    pub upload_public_prefix: String,
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Self {
            base: BaseConfig::from_env("GATEWAY_PORT", GATEWAY_PORT)?,
            store_service_url: env::var("STORE_SERVICE_URL")
                .unwrap_or_else(|_| STORE_SERVICE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            store_service_timeout_secs: env::var("STORE_SERVICE_TIMEOUT_SECS")
                .unwrap_or_else(|_| STORE_SERVICE_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(STORE_SERVICE_TIMEOUT_SECS),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| UPLOAD_DIR.to_string())
                .into(),
            upload_public_prefix: normalize_prefix(
                &env::var("UPLOAD_PUBLIC_PREFIX").unwrap_or_else(|_| UPLOAD_PUBLIC_PREFIX.to_string()),
            ),
            max_body_bytes: env::var("GATEWAY_MAX_BODY_BYTES")
                .unwrap_or_else(|_| GATEWAY_MAX_BODY_BYTES.to_string())
                .parse()
                .unwrap_or(GATEWAY_MAX_BODY_BYTES),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.base.validate()?;

        if !(self.store_service_url.starts_with("http://")
            || self.store_service_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "STORE_SERVICE_URL must be an http:// or https:// URL"
            ));
        }

        if self.store_service_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "STORE_SERVICE_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        if self.upload_public_prefix == "/" {
            return Err(anyhow::anyhow!(
                "UPLOAD_PUBLIC_PREFIX must name a path below the root"
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("GATEWAY_MAX_BODY_BYTES must be greater than 0"));
        }

        Ok(())
    }
}

/// `uploads/` and `/uploads/` both become `/uploads`.
fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", prefix.trim().trim_matches('/'))
}
