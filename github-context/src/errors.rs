//! Crate-wide error hierarchy for github-context.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Root error type for the github-context crate.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// GitHub REST API related failure.
    #[error(transparent)]
    Provider(#[from] GitHubProviderError),

    /// File content could not be turned into text.
    #[error(transparent)]
    Content(#[from] GitHubContentError),

    /// Configuration problems (missing token, bad base URL).
    #[error(transparent)]
    Config(#[from] GitHubConfigError),
}

/// Provider-specific error used inside the REST layer.
#[derive(Debug, Error)]
pub enum GitHubProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while decoding a file returned by the contents API.
#[derive(Debug, Error)]
pub enum GitHubContentError {
    /// The contents API announced an encoding we cannot decode.
    #[error("unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    /// Base64 payload was malformed.
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8 (binary file).
    #[error("content is not valid utf-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum GitHubConfigError {
    /// Missing required access token.
    #[error("missing github token")]
    MissingToken,

    /// Invalid base API URL.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::Provider(GitHubProviderError::from(e))
    }
}

impl From<base64::DecodeError> for GitHubError {
    fn from(e: base64::DecodeError) -> Self {
        GitHubError::Content(GitHubContentError::Base64(e))
    }
}

impl From<std::string::FromUtf8Error> for GitHubError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        GitHubError::Content(GitHubContentError::NotUtf8(e))
    }
}

// ===== Mapping from reqwest::Error into GitHubProviderError =====

impl From<reqwest::Error> for GitHubProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitHubProviderError::Timeout;
        }

        if let Some(status) = e.status() {
            return GitHubProviderError::from_status(status.as_u16());
        }

        if e.is_decode() {
            return GitHubProviderError::InvalidResponse(e.to_string());
        }

        GitHubProviderError::Network(e.to_string())
    }
}

impl GitHubProviderError {
    /// Classifies a non-success HTTP status code.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 => GitHubProviderError::Unauthorized,
            403 => GitHubProviderError::Forbidden,
            404 => GitHubProviderError::NotFound,
            429 => GitHubProviderError::RateLimited,
            500..=599 => GitHubProviderError::Server(code),
            _ => GitHubProviderError::HttpStatus(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, "unauthorized")]
    #[case(403, "forbidden")]
    #[case(404, "not found")]
    #[case(429, "rate limited")]
    #[case(502, "server error: status 502")]
    #[case(422, "http status error: status 422")]
    fn status_codes_map_to_provider_errors(#[case] code: u16, #[case] expected: &str) {
        assert_eq!(GitHubProviderError::from_status(code).to_string(), expected);
    }
}
