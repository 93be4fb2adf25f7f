//! Token settings.
//!
//! Settings are validated once, at construction. A `TokenSettings` value that
//! exists is safe to issue tokens with; there is no degraded mode.

use common::jwt::{DEFAULT_CLOCK_SKEW, MAX_CLOCK_SKEW};
use common::secret::{secret_len, SecretString};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Minimum signing secret length in bytes.
pub const MIN_SIGNING_SECRET_BYTES: usize = 16;

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TOKEN_MINUTES: u64 = 15;

/// Default refresh token lifetime in minutes (30 days).
pub const DEFAULT_REFRESH_TOKEN_MINUTES: u64 = 60 * 24 * 30;

/// Default JWT clock skew tolerance in seconds.
pub const DEFAULT_JWT_CLOCK_SKEW_SECONDS: u64 = DEFAULT_CLOCK_SKEW.as_secs();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidNumber { name: String, reason: String },

    #[error("Token issuer must not be empty")]
    EmptyIssuer,

    #[error("Signing secret too short: expected at least {min} bytes, got {actual}")]
    WeakSigningSecret { min: usize, actual: usize },

    #[error("{0} must be at least one second")]
    NonPositiveLifetime(&'static str),

    #[error("JWT clock skew must be between 1 and {max} seconds, got {actual}")]
    InvalidClockSkew { max: u64, actual: u64 },
}

/// Immutable token issuance settings.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    issuer: String,
    signing_secret: SecretString,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
    clock_skew: Duration,
}

impl TokenSettings {
    /// Build validated settings with the default clock skew.
    pub fn new(
        issuer: impl Into<String>,
        signing_secret: SecretString,
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> Result<Self, ConfigError> {
        let issuer = issuer.into();
        if issuer.trim().is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }

        let actual = secret_len(&signing_secret);
        if actual < MIN_SIGNING_SECRET_BYTES {
            return Err(ConfigError::WeakSigningSecret {
                min: MIN_SIGNING_SECRET_BYTES,
                actual,
            });
        }

        // Timestamps have second resolution; anything shorter would give exp == iat
        if access_token_lifetime.as_secs() == 0 {
            return Err(ConfigError::NonPositiveLifetime("Access token lifetime"));
        }
        if refresh_token_lifetime.as_secs() == 0 {
            return Err(ConfigError::NonPositiveLifetime("Refresh token lifetime"));
        }

        if refresh_token_lifetime <= access_token_lifetime {
            tracing::warn!(
                target: "auth.config",
                access_secs = access_token_lifetime.as_secs(),
                refresh_secs = refresh_token_lifetime.as_secs(),
                "Refresh token lifetime is not longer than access token lifetime"
            );
        }

        Ok(Self {
            issuer,
            signing_secret,
            access_token_lifetime,
            refresh_token_lifetime,
            clock_skew: DEFAULT_CLOCK_SKEW,
        })
    }

    /// Override the clock skew tolerance used when verifying `iat`.
    pub fn with_clock_skew(mut self, clock_skew: Duration) -> Result<Self, ConfigError> {
        let actual = clock_skew.as_secs();
        if actual == 0 || clock_skew > MAX_CLOCK_SKEW {
            return Err(ConfigError::InvalidClockSkew {
                max: MAX_CLOCK_SKEW.as_secs(),
                actual,
            });
        }
        self.clock_skew = clock_skew;
        Ok(self)
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load settings from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let issuer = vars
            .get("TOKEN_ISSUER")
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_ISSUER".to_string()))?
            .clone();

        let signing_secret = vars
            .get("TOKEN_SIGNING_KEY")
            .map(|key| SecretString::from(key.as_str()))
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_SIGNING_KEY".to_string()))?;

        let access_minutes = parse_u64(
            vars,
            "ACCESS_TOKEN_EXPIRATION_MINUTES",
            DEFAULT_ACCESS_TOKEN_MINUTES,
        )?;
        let refresh_minutes = parse_u64(
            vars,
            "REFRESH_TOKEN_EXPIRATION_MINUTES",
            DEFAULT_REFRESH_TOKEN_MINUTES,
        )?;
        let clock_skew_secs =
            parse_u64(vars, "JWT_CLOCK_SKEW_SECONDS", DEFAULT_JWT_CLOCK_SKEW_SECONDS)?;

        Self::new(
            issuer,
            signing_secret,
            minutes(access_minutes),
            minutes(refresh_minutes),
        )?
        .with_clock_skew(Duration::from_secs(clock_skew_secs))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn signing_secret(&self) -> &SecretString {
        &self.signing_secret
    }

    pub fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        self.refresh_token_lifetime
    }

    pub fn clock_skew(&self) -> Duration {
        self.clock_skew
    }
}

fn minutes(value: u64) -> Duration {
    Duration::from_secs(value.saturating_mul(60))
}

fn parse_u64(vars: &HashMap<String, String>, name: &str, default: u64) -> Result<u64, ConfigError> {
    match vars.get(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidNumber {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}
