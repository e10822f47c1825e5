//! Client for the external analysis backend.
//!
//! The backend receives one JSON payload per handled review event and may
//! answer with a comment to post back on the pull request.

pub mod config;
pub mod error_handler;
pub mod payload;
pub mod services;

pub use config::backend_config::BackendConfig;
pub use error_handler::{BackendError, ConfigError};
pub use payload::{
    BackendPayload, EventDetails, PayloadKind, PullRequestInfo, ReviewCommentDetails,
    ReviewDetails,
};
pub use services::notifier::BackendNotifier;
