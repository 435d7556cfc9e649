use dotenvy::dotenv;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_JWT_EXPIRATION_MINUTES: u64 = 7 * 24 * 60;
const MAX_JWT_EXPIRATION_MINUTES: u64 = 365 * 24 * 60;
const DEFAULT_POOL_SIZE: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
    pub port: u16,
    pub cors_origin: String,
    pub app_env: String,
    pub database_pool_size: usize,
}

impl Config {
    /// Reads `.env` (if present) and the process environment. Every missing
    /// required variable is reported at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str, missing: &mut Vec<String>| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let mut missing = Vec::new();
        let database_url = required("DATABASE_URL", &mut missing);
        let jwt_secret = required("JWT_SECRET", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let config = Config {
            database_url,
            jwt_secret,
            jwt_expiration_minutes: parse_or(
                &lookup,
                "JWT_EXPIRATION_MINUTES",
                DEFAULT_JWT_EXPIRATION_MINUTES,
            )?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            app_env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            database_pool_size: parse_or(&lookup, "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?,
        };

        if config.database_pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(1..=MAX_JWT_EXPIRATION_MINUTES).contains(&config.jwt_expiration_minutes) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_MINUTES".to_string(),
                message: format!("must be between 1 and {MAX_JWT_EXPIRATION_MINUTES}"),
            });
        }

        tracing::info!("Config loaded");

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
