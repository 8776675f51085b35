use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::pagination::PaginationConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Bootstrap account created (or promoted) at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Token settings shared with the request extractors through app data.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub admin: Option<AdminSeed>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminSeed {
                    email: env::var("ADMIN_EMAIL").unwrap_or_default(),
                    username,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port: parse_or("PORT", 8080),
            auth: AuthConfig {
                jwt_secret,
                token_ttl_secs: parse_or("JWT_TTL_SECS", 86_400),
            },
            pagination: PaginationConfig::new(
                parse_or("PAGE_SIZE", PaginationConfig::DEFAULT_PAGE_SIZE),
                parse_or("MAX_PAGE_SIZE", PaginationConfig::DEFAULT_MAX_PAGE_SIZE),
            ),
            admin,
            run_migrations: parse_or("RUN_MIGRATIONS", true),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?} ({e}), using default: {default}");
            default
        }),
        Err(_) => default,
    }
}
