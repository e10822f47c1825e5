//! Inbound webhook events.
//!
//! Only the fields the bridge reads are modelled; GitHub sends many more.

use serde::Deserialize;

use crate::errors::EventError;

/// `X-GitHub-Event` value for submitted/edited/dismissed reviews.
pub const PULL_REQUEST_REVIEW: &str = "pull_request_review";
/// `X-GitHub-Event` value for inline diff comments.
pub const PULL_REQUEST_REVIEW_COMMENT: &str = "pull_request_review_comment";

/// Every delivery the router can receive.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    /// `pull_request_review` with `action = "submitted"`.
    ReviewSubmitted(Box<ReviewSubmittedEvent>),
    /// `pull_request_review_comment` with `action = "created"`.
    ReviewCommentCreated(Box<ReviewCommentCreatedEvent>),
    /// Anything else (other kinds, other actions, `ping`).
    Ignored {
        event: String,
        action: Option<String>,
    },
}

impl WebhookEvent {
    /// Parses a delivery from its `X-GitHub-Event` name and raw body.
    ///
    /// Deliveries the router does not handle become [`WebhookEvent::Ignored`]
    /// as long as the body is a JSON object.
    pub fn parse(event: &str, body: &[u8]) -> Result<Self, EventError> {
        let invalid = |source| EventError::Payload {
            event: event.to_string(),
            source,
        };

        let envelope: ActionEnvelope = serde_json::from_slice(body).map_err(invalid)?;

        match (event, envelope.action.as_deref()) {
            (PULL_REQUEST_REVIEW, Some("submitted")) => Ok(Self::ReviewSubmitted(
                serde_json::from_slice(body).map_err(invalid)?,
            )),
            (PULL_REQUEST_REVIEW_COMMENT, Some("created")) => Ok(Self::ReviewCommentCreated(
                serde_json::from_slice(body).map_err(invalid)?,
            )),
            _ => Ok(Self::Ignored {
                event: event.to_string(),
                action: envelope.action,
            }),
        }
    }

    /// Short label for logs and acknowledgements.
    pub fn label(&self) -> String {
        match self {
            Self::ReviewSubmitted(_) => format!("{PULL_REQUEST_REVIEW}.submitted"),
            Self::ReviewCommentCreated(_) => format!("{PULL_REQUEST_REVIEW_COMMENT}.created"),
            Self::Ignored {
                event,
                action: Some(action),
            } => format!("{event}.{action}"),
            Self::Ignored { event, action: None } => event.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmittedEvent {
    pub review: Review,
    pub pull_request: PullRequest,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Sender>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCommentCreatedEvent {
    pub comment: ReviewComment,
    pub pull_request: PullRequest,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Sender>,
}

/// Actor that triggered the delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub login: Option<String>,
    /// `User`, `Bot` or `Organization`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    pub base: GitRef,
    pub head: GitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    /// `null` for reviews submitted without text.
    #[serde(default)]
    pub body: Option<String>,
    /// `approved`, `changes_requested` or `commented`.
    pub state: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    /// `null` or missing is treated like an empty comment.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub diff_hunk: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// `null` once the comment is outdated.
    #[serde(default)]
    pub position: Option<u64>,
    #[serde(default)]
    pub user: Option<User>,
}
