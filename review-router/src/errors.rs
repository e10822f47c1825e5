//! Error types for event parsing and handling.

use github_context::GitHubError;
use thiserror::Error;

/// Convenient alias for handler results.
pub type RouterResult<T> = Result<T, RouterError>;

/// Failures that abort handling of a single event.
///
/// Per-file content lookups and backend calls never show up here: they are
/// absorbed by the fetcher and the notifier and degrade to "no content" and
/// "no comment".
#[derive(Debug, Error)]
pub enum RouterError {
    /// Enumerating the pull request's changed files failed.
    #[error("failed to list changed files: {0}")]
    Listing(#[source] GitHubError),

    /// Writing the comment back to GitHub failed.
    #[error("failed to post comment: {0}")]
    Post(#[source] GitHubError),
}

/// A delivery body that does not match the shape of its event.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid {event} payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
