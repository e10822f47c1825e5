use serde::Serialize;

/// Acknowledgement returned for every verified delivery.
#[derive(Debug, Serialize)]
pub struct GitHubWebhookResponse {
    /// `event.action` label, e.g. "pull_request_review.submitted".
    pub event: String,
    /// Whether the delivery was handed to the review router.
    pub accepted: bool,
}
