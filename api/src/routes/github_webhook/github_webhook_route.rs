use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use review_router::WebhookEvent;
use tracing::{Instrument, Span, debug, field, info, info_span, instrument, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse, signature::verify_signature},
    error_handler::{AppError, AppResult},
    routes::github_webhook::github_webhook_response::GitHubWebhookResponse,
};

/// POST /api/github/webhooks
///
/// Verifies the delivery signature (when a secret is configured), parses
/// the event and hands handled events to the review router on a background
/// task. The delivery is acknowledged with 200 regardless of how handling
/// turns out.
#[instrument(name = "github_webhook_route", skip_all, fields(delivery = field::Empty))]
pub async fn github_webhook_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let delivery = header_str(&headers, "X-GitHub-Delivery").unwrap_or("-");
    Span::current().record("delivery", delivery);

    if let Some(secret) = state.webhook_secret.as_deref() {
        let signature = header_str(&headers, "X-Hub-Signature-256");
        verify_signature(secret.as_bytes(), &body, signature).inspect_err(|err| {
            warn!(error = %err, "rejecting delivery with invalid signature");
        })?;
    }

    let event_name = header_str(&headers, "X-GitHub-Event")
        .ok_or_else(|| AppError::BadRequest("missing X-GitHub-Event header".into()))?;

    let event = WebhookEvent::parse(event_name, &body)?;
    let label = event.label();

    let accepted = !matches!(event, WebhookEvent::Ignored { .. });
    if accepted {
        info!(event = %label, "dispatching delivery");
        let router = state.router.clone();
        let span = info_span!("review_event", event = %label, delivery = %delivery);
        state.tasks.spawn(
            async move {
                router.dispatch(&event).await;
            }
            .instrument(span),
        );
    } else {
        debug!(event = %label, "ignoring delivery");
    }

    Ok(ApiResponse::success(GitHubWebhookResponse {
        event: label,
        accepted,
    })
    .into_response_with_status(StatusCode::OK))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
