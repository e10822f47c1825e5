//! Review event routing.
//!
//! Turns GitHub `pull_request_review.submitted` and
//! `pull_request_review_comment.created` deliveries into backend payloads
//! and posts the backend's answer back on the pull request.

pub mod bot_filter;
pub mod errors;
pub mod events;
pub mod router;

pub use bot_filter::is_from_bot;
pub use errors::{EventError, RouterError, RouterResult};
pub use events::WebhookEvent;
pub use router::{Outcome, ReviewRouter, SkipReason};
