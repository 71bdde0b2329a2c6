use std::env;

use anyhow::{Context, Result};

/// Runtime configuration collected from the environment at startup and
/// carried in [`crate::AppState`] so handlers never touch process globals.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allow_origin: Option<String>,
    pub smtp: SmtpConfig,
    /// Fixed operator mailbox every notification is relayed to.
    pub notify_email: String,
    pub enquiry_ttl_days: i64,
    pub quotation_ttl_days: i64,
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

const DEFAULT_ENQUIRY_TTL_DAYS: i64 = 30;
const DEFAULT_QUOTATION_TTL_DAYS: i64 = 7;

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL env var is missing")?;

        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").context("SMTP_HOST env var is missing")?,
            port: parse_var("SMTP_PORT", 587)?,
            username: env::var("SMTP_USERNAME").context("SMTP_USERNAME env var is missing")?,
            password: env::var("SMTP_PASSWORD").context("SMTP_PASSWORD env var is missing")?,
            from_email: env::var("FROM_EMAIL").context("FROM_EMAIL env var is missing")?,
        };

        let notify_email =
            env::var("NOTIFY_EMAIL").context("NOTIFY_EMAIL env var is missing")?;

        Ok(Self {
            database_url,
            port: parse_var("PORT", 8080)?,
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN").ok().filter(|v| !v.is_empty()),
            smtp,
            notify_email,
            enquiry_ttl_days: parse_var("ENQUIRY_TTL_DAYS", DEFAULT_ENQUIRY_TTL_DAYS)?,
            quotation_ttl_days: parse_var("QUOTATION_TTL_DAYS", DEFAULT_QUOTATION_TTL_DAYS)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} env var is not a valid value")),
        Err(_) => Ok(default),
    }
}
