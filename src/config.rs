use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Employee name cache
    pub name_cache_capacity: u64,
    pub name_cache_ttl: Duration,

    pub log_dir: String,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,

            rate_protected_per_min: parsed_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            name_cache_capacity: parsed_or("NAME_CACHE_CAPACITY", 100_000)?,
            // default 24h
            name_cache_ttl: Duration::from_secs(parsed_or("NAME_CACHE_TTL_SECS", 86_400)?),

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_or_uses_default_when_unset() {
        let value: u32 = parsed_or("LEAVE_DESK_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn parsed_or_reports_bad_numbers() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("LEAVE_DESK_TEST_BAD_NUMBER", "ten") };
        let err = parsed_or::<u32>("LEAVE_DESK_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("LEAVE_DESK_TEST_BAD_NUMBER"));
    }
}
