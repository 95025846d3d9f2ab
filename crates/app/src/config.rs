//! Environment-driven configuration.

use std::path::PathBuf;

use thiserror::Error;

use edudash_auth::{DEFAULT_ROLE_FALLBACK, RoleFallback};
use edudash_observability::LogFormat;
use edudash_privacy::RemovalPolicy;

pub const FALLBACK_ROLE_VAR: &str = "EDUDASH_FALLBACK_ROLE";
pub const REMOVAL_POLICY_VAR: &str = "EDUDASH_REMOVAL_POLICY";
pub const SEED_PATH_VAR: &str = "EDUDASH_SEED_PATH";
pub const LOG_FORMAT_VAR: &str = "EDUDASH_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Applied when a caller presents no role.
    pub fallback: RoleFallback,
    pub removal: RemovalPolicy,
    /// JSON seed file; the built-in demo set is used when absent.
    pub seed_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_ROLE_FALLBACK,
            removal: RemovalPolicy::default(),
            seed_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys keep their
    /// defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(FALLBACK_ROLE_VAR) {
            config.fallback = raw.parse().map_err(|e: edudash_auth::UnknownRole| ConfigError {
                var: FALLBACK_ROLE_VAR,
                message: e.to_string(),
            })?;
        }

        if let Some(raw) = get(REMOVAL_POLICY_VAR) {
            config.removal = raw.parse().map_err(|e: edudash_privacy::UnknownRemovalPolicy| ConfigError {
                var: REMOVAL_POLICY_VAR,
                message: e.to_string(),
            })?;
        }

        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw.parse().map_err(|e: edudash_observability::UnknownLogFormat| ConfigError {
                var: LOG_FORMAT_VAR,
                message: e.to_string(),
            })?;
        }

        config.seed_path = get(SEED_PATH_VAR).map(PathBuf::from);

        Ok(config)
    }
}
