use analysis_backend::{BackendConfig, BackendError, BackendNotifier, error_handler::env_opt};
use github_context::{DEFAULT_API_BASE, GitHubClient, GitHubConfig, GitHubError};
use review_router::ReviewRouter;
use thiserror::Error;
use tokio_util::task::TaskTracker;
use tracing::{error, warn};

/// Default listen address when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind, e.g. "0.0.0.0:3000".
    pub api_address: String,
    pub github: GitHubConfig,
    pub backend: BackendConfig,
    /// Shared secret configured on the GitHub webhook, if any.
    pub webhook_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env_opt("GITHUB_TOKEN").ok_or(ConfigError::MissingVar("GITHUB_TOKEN"))?;

        Ok(Self {
            api_address: env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            github: GitHubConfig {
                base_api: env_opt("GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
                token,
            },
            backend: BackendConfig::from_env()?,
            webhook_secret: env_opt("WEBHOOK_SECRET"),
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routes deliveries to the backend and posts answers back.
    pub router: ReviewRouter,
    /// Secret used to verify `X-Hub-Signature-256`; `None` disables the check.
    pub webhook_secret: Option<String>,
    /// Background handling tasks; drained before the server returns.
    pub tasks: TaskTracker,
}

impl AppState {
    pub fn new(router: ReviewRouter, webhook_secret: Option<String>) -> Self {
        Self {
            router,
            webhook_secret,
            tasks: TaskTracker::new(),
        }
    }

    /// Builds the GitHub client and backend notifier from configuration.
    pub fn from_config(cfg: AppConfig) -> Result<Self, ConfigError> {
        let github = GitHubClient::from_config(cfg.github)?;
        let notifier = BackendNotifier::new(cfg.backend)?;

        if !notifier.is_configured() {
            error!("BACKEND_URL is not set; events will be acknowledged but no comments posted");
        }
        if cfg.webhook_secret.is_none() {
            warn!("WEBHOOK_SECRET is not set; webhook signatures will not be verified");
        }

        Ok(Self::new(
            ReviewRouter::new(github, notifier),
            cfg.webhook_secret,
        ))
    }
}
