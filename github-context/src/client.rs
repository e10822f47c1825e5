//! GitHub REST v3 client shared by the fetcher, the collector and the
//! comment publisher.
//!
//! Endpoints used:
//!   * GET  /repos/{owner}/{repo}/pulls/{number}/files
//!   * GET  /repos/{owner}/{repo}/contents/{path}?ref={ref}
//!   * POST /repos/{owner}/{repo}/issues/{number}/comments
//!   * POST /repos/{owner}/{repo}/pulls/{number}/comments/{id}/replies

use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::errors::{GitHubConfigError, GitHubResult};

/// Default public GitHub REST base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = "review-bridge/0.1";
const API_VERSION: &str = "2022-11-28";

/// Runtime configuration for [`GitHubClient`].
///
/// Usually injected from environment by the HTTP layer.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base, e.g. "https://api.github.com" or "https://ghe.example.com/api/v3".
    pub base_api: String,
    /// Access token (PAT or installation token), sent as a bearer token.
    pub token: String,
}

/// GitHub HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    /// Builds a client with a stable user agent so GitHub can identify the
    /// integration.
    pub fn from_config(cfg: GitHubConfig) -> GitHubResult<Self> {
        let token = cfg.token.trim().to_string();
        if token.is_empty() {
            return Err(GitHubConfigError::MissingToken.into());
        }

        let base_api = cfg.base_api.trim().trim_end_matches('/').to_string();
        if !(base_api.starts_with("http://") || base_api.starts_with("https://")) {
            return Err(GitHubConfigError::InvalidBaseUrl(cfg.base_api).into());
        }

        debug!("Creating GitHubClient with base_api={}", base_api);

        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_api,
            token,
        })
    }

    /// Absolute URL for a path under `/repos/{owner}/{repo}`.
    pub(crate) fn repo_url(&self, owner: &str, repo: &str, tail: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.base_api, owner, repo, tail)
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.authorized(self.http.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.authorized(self.http.post(url))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}
