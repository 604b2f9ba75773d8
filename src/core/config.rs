use chrono_tz::Tz;

use crate::auth::{JwtConfig, JwtError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | DATABASE_PATH | ./staff.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | TIMEZONE | UTC | business timezone for the attendance day boundary |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (required) | signing key, at least 32 chars, no fallback |
/// | JWT_EXPIRATION_MINUTES | 1440 | token validity window |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | (unset) | bootstrap admin, seeded when no admin exists |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone; "today" for attendance is midnight-to-midnight here
    pub timezone: Tz,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Bootstrap admin credentials (both must be set to seed)
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails when `JWT_SECRET` is missing/too short or `TIMEZONE` does
    /// not name a valid IANA timezone; neither gets a silent fallback
    /// to an insecure or surprising value.
    pub fn from_env() -> Result<Self, JwtError> {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name.parse::<Tz>().map_err(|_| {
                JwtError::ConfigError(format!("TIMEZONE '{}' is not a valid IANA timezone", name))
            })?,
            Err(_) => Tz::UTC,
        };

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./staff.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            jwt: JwtConfig::from_env()?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
