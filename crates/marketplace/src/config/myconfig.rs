use anyhow::{Context, Result, anyhow};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct OrderPlacementConfig {
    pub timeout: Duration,
    pub conflict_retries: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub run_migrations: bool,
    pub port: u16,
    pub otel_endpoint: String,
    pub order_placement: OrderPlacementConfig,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
        },
        Err(_) => Ok(default),
    }
}

fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            env_or("DB_USER", "postgres"),
            env_or("DB_PASSWORD", "postgres"),
            env_or("DB_HOST", "localhost"),
            env_or("DB_PORT", "5432"),
            env_or("DB_NAME", "ecommerce"),
            env_or("DB_SSLMODE", "disable"),
        )
    })
}

impl Config {
    pub fn init() -> Result<Self> {
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let database = DatabaseConfig {
            url: database_url(),
            min_connections: parse_env("DB_MIN_CONNECTION", 1)?,
            max_connections: parse_env("DB_MAX_CONNECTION", 5)?,
        };

        if database.min_connections > database.max_connections {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({}) exceeds DB_MAX_CONNECTION ({})",
                database.min_connections,
                database.max_connections
            ));
        }

        let timeout_secs: u64 = parse_env("ORDER_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(anyhow!("ORDER_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(Self {
            database,
            jwt_secret,
            jwt_ttl_hours: parse_env("JWT_TTL_HOURS", 24)?,
            run_migrations: parse_flag("RUN_MIGRATIONS", true)?,
            port: parse_env("PORT", 8080)?,
            otel_endpoint: env_or("OTEL_ENDPOINT", "http://otel-collector:4317"),
            order_placement: OrderPlacementConfig {
                timeout: Duration::from_secs(timeout_secs),
                conflict_retries: parse_env("ORDER_CONFLICT_RETRIES", 0)?,
            },
            is_dev: parse_flag("DEV_MODE", false)?,
            enable_file_log: parse_flag("ENABLE_FILE_LOG", false)?,
        })
    }
}
