//! Backend notifier: sends one payload, extracts one optional comment.
//!
//! - `POST {endpoint}` with the JSON [`BackendPayload`]
//! - expects `{ "comment": string }` back; any other shape means "no comment"

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::config::backend_config::BackendConfig;
use crate::error_handler::{BackendError, ConfigError, Result};
use crate::payload::BackendPayload;

/// Thin client for the analysis backend.
///
/// Cloning is cheap; the underlying HTTP client is shared.
#[derive(Debug, Clone)]
pub struct BackendNotifier {
    client: reqwest::Client,
    cfg: BackendConfig,
}

impl BackendNotifier {
    /// Creates a notifier. An absent endpoint is accepted and reported on
    /// each call.
    ///
    /// # Errors
    /// - [`BackendError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, cfg })
    }

    pub fn is_configured(&self) -> bool {
        self.cfg.endpoint.is_some()
    }

    /// Sends the payload and returns the comment to post, if any.
    ///
    /// Never fails: configuration, transport, status and decode errors are
    /// logged and reported as `None`.
    pub async fn notify(&self, payload: &BackendPayload) -> Option<String> {
        match self.try_notify(payload).await {
            Ok(comment) => comment,
            Err(err) => {
                error!(
                    kind = ?payload.kind(),
                    pr = payload.pull_request.pr_number,
                    error = %err,
                    "backend notification failed"
                );
                None
            }
        }
    }

    /// Fallible core of [`BackendNotifier::notify`].
    ///
    /// `Ok(None)` means the backend answered but had nothing to say.
    ///
    /// # Errors
    /// - [`ConfigError::MissingEndpoint`] if no endpoint is configured
    /// - [`BackendError::Transport`] for client errors
    /// - [`BackendError::HttpStatus`] for non-2xx responses
    /// - [`BackendError::Decode`] if the body is not JSON
    #[instrument(skip_all, fields(kind = ?payload.kind(), pr = payload.pull_request.pr_number))]
    pub async fn try_notify(&self, payload: &BackendPayload) -> Result<Option<String>> {
        let url = self
            .cfg
            .endpoint
            .as_deref()
            .ok_or(ConfigError::MissingEndpoint)?;

        debug!(files = payload.files.len(), "POST {}", url);
        let mut req = self.client.post(url).json(payload);
        if let Some(key) = self.cfg.api_key.as_deref() {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let snippet = text.chars().take(240).collect::<String>();
            return Err(BackendError::HttpStatus {
                status,
                url: url.to_string(),
                snippet,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| BackendError::Decode(format!("serde error: {e}")))?;

        Ok(extract_comment(&body))
    }
}

/// Pulls a non-blank `comment` string out of a backend response.
///
/// The text is returned verbatim; only whitespace-only values are dropped.
pub fn extract_comment(body: &Value) -> Option<String> {
    body.get("comment")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
}
