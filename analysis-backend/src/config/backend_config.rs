//! Backend destination settings loaded from environment variables.
//!
//! # Environment variables
//!
//! - `BACKEND_URL`          = destination endpoint (optional; unset disables posting)
//! - `BACKEND_API_KEY`      = bearer token sent to the backend (optional)
//! - `BACKEND_TIMEOUT_SECS` = request timeout (optional; transport default when unset)

use crate::error_handler::{Result, env_opt, env_opt_u64, validate_http_endpoint};

/// Configuration for the analysis backend call.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    /// Destination URL receiving the JSON payload.
    pub endpoint: Option<String>,

    /// Optional bearer token for the backend.
    pub api_key: Option<String>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Config pointing at `endpoint` with no key and no timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Loads the config from the environment.
    ///
    /// A missing `BACKEND_URL` is not an error here; the notifier reports it
    /// on every call instead.
    ///
    /// # Errors
    ///
    /// - [`crate::error_handler::ConfigError::InvalidFormat`] if `BACKEND_URL` has no http(s) scheme
    /// - [`crate::error_handler::ConfigError::InvalidNumber`] if `BACKEND_TIMEOUT_SECS` is not a number
    pub fn from_env() -> Result<Self> {
        let endpoint = env_opt("BACKEND_URL");
        if let Some(url) = endpoint.as_deref() {
            validate_http_endpoint("BACKEND_URL", url)?;
        }

        Ok(Self {
            endpoint,
            api_key: env_opt("BACKEND_API_KEY"),
            timeout_secs: env_opt_u64("BACKEND_TIMEOUT_SECS")?,
        })
    }
}
