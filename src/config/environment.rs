//! Environment configuration
//!
//! Read once at start-up from the process environment (after `.env` is
//! loaded). Missing variables fall back to development defaults; malformed
//! values are start-up errors.

use std::env;

use anyhow::{bail, Context, Result};

const DEV_JWT_SECRET: &str = "fleetflow-development-secret-change-me";

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    /// Session lifetime in seconds.
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "sqlite://fleetflow.db".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 8 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => defaults.jwt_secret,
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.jwt_expiration, 28_800);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("FLEETFLOW_TEST_PORT", "not-a-port");
        assert!(parse_var::<u16>("FLEETFLOW_TEST_PORT", 1).is_err());
        env::set_var("FLEETFLOW_TEST_PORT", " 8080 ");
        assert_eq!(parse_var::<u16>("FLEETFLOW_TEST_PORT", 1).unwrap(), 8080);
        env::remove_var("FLEETFLOW_TEST_PORT");
        assert_eq!(parse_var::<u16>("FLEETFLOW_TEST_PORT", 1).unwrap(), 1);
    }
}
