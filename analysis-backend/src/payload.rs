//! Payload sent to the analysis backend.
//!
//! Field groups are mutually exclusive: a `review` payload carries the
//! review group and nulls for the inline-comment group, and vice versa.
//! The exclusivity lives in [`EventDetails`]; the flat wire shape is
//! produced at serialization time.

use github_context::ChangedFile;
use serde::{Deserialize, Serialize, Serializer};

/// Which inbound event produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Review,
    ReviewComment,
}

/// Pull request and repository identification common to both kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestInfo {
    pub owner: String,
    pub repo: String,
    pub repo_full_name: String,
    pub pr_number: u64,
    pub pr_title: String,
    pub pr_body: Option<String>,
    pub pr_author: Option<String>,
    pub base_sha: String,
    pub head_sha: String,
}

/// A submitted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDetails {
    pub body: String,
    /// `approved`, `changes_requested` or `commented`.
    pub state: String,
    pub reviewer: Option<String>,
}

/// A single inline diff comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCommentDetails {
    pub body: String,
    pub diff_hunk: Option<String>,
    pub path: Option<String>,
    pub position: Option<u64>,
    pub comment_id: u64,
    pub commenter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetails {
    Review(ReviewDetails),
    ReviewComment(ReviewCommentDetails),
}

impl EventDetails {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Review(_) => PayloadKind::Review,
            Self::ReviewComment(_) => PayloadKind::ReviewComment,
        }
    }
}

/// Built once per event, sent once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendPayload {
    pub pull_request: PullRequestInfo,
    pub details: EventDetails,
    pub files: Vec<ChangedFile>,
}

impl BackendPayload {
    pub fn kind(&self) -> PayloadKind {
        self.details.kind()
    }
}

/// Flat JSON shape of [`BackendPayload`].
#[derive(Serialize)]
struct WirePayload<'a> {
    kind: PayloadKind,
    #[serde(flatten)]
    pull_request: &'a PullRequestInfo,
    review_body: Option<&'a str>,
    review_state: Option<&'a str>,
    reviewer: Option<&'a str>,
    comment_body: Option<&'a str>,
    diff_hunk: Option<&'a str>,
    path: Option<&'a str>,
    position: Option<u64>,
    comment_id: Option<u64>,
    commenter: Option<&'a str>,
    files: &'a [ChangedFile],
}

impl<'a> From<&'a BackendPayload> for WirePayload<'a> {
    fn from(p: &'a BackendPayload) -> Self {
        let mut wire = WirePayload {
            kind: p.kind(),
            pull_request: &p.pull_request,
            review_body: None,
            review_state: None,
            reviewer: None,
            comment_body: None,
            diff_hunk: None,
            path: None,
            position: None,
            comment_id: None,
            commenter: None,
            files: &p.files,
        };

        match &p.details {
            EventDetails::Review(r) => {
                wire.review_body = Some(&r.body);
                wire.review_state = Some(&r.state);
                wire.reviewer = r.reviewer.as_deref();
            }
            EventDetails::ReviewComment(c) => {
                wire.comment_body = Some(&c.body);
                wire.diff_hunk = c.diff_hunk.as_deref();
                wire.path = c.path.as_deref();
                wire.position = c.position;
                wire.comment_id = Some(c.comment_id);
                wire.commenter = c.commenter.as_deref();
            }
        }

        wire
    }
}

impl Serialize for BackendPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WirePayload::from(self).serialize(serializer)
    }
}
