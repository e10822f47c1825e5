//! Event router.
//!
//! Both handled events run through one routine:
//!   * drop bot-originated deliveries
//!   * drop deliveries whose triggering text is blank
//!   * collect the pull request's changed files with base/head content
//!   * send the payload to the analysis backend
//!   * post a non-blank answer back (conversation comment for reviews,
//!     threaded reply for inline comments).

use analysis_backend::{
    BackendNotifier, BackendPayload, EventDetails, PullRequestInfo, ReviewCommentDetails,
    ReviewDetails,
};
use github_context::{GitHubClient, PullRequestRef, RepoRef};
use tracing::{debug, error, info, instrument};

use crate::bot_filter::is_from_bot;
use crate::errors::{RouterError, RouterResult};
use crate::events::{
    PullRequest, Repository, ReviewCommentCreatedEvent, ReviewSubmittedEvent, Sender,
    WebhookEvent,
};

/// Why an event produced no backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Bot,
    EmptyText,
    Unhandled,
}

/// What handling an event ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    /// The backend had nothing to say (or could not be reached).
    NoComment,
    /// A comment was written back; carries the new GitHub comment id.
    Posted { comment_id: u64 },
}

/// Where the backend's answer goes.
#[derive(Debug, Clone, Copy)]
enum ReplyTarget {
    Conversation,
    Thread { comment_id: u64 },
}

/// Parts of a handled event the shared routine needs.
struct Trigger<'a> {
    sender: Option<&'a Sender>,
    text: &'a str,
    pull_request: &'a PullRequest,
    repository: &'a Repository,
    details: EventDetails,
    reply: ReplyTarget,
}

impl<'a> Trigger<'a> {
    fn from_review(e: &'a ReviewSubmittedEvent) -> Self {
        let text = e.review.body.as_deref().unwrap_or_default();
        Self {
            sender: e.sender.as_ref(),
            text,
            pull_request: &e.pull_request,
            repository: &e.repository,
            details: EventDetails::Review(ReviewDetails {
                body: text.to_string(),
                state: e.review.state.clone(),
                reviewer: e.review.user.as_ref().map(|u| u.login.clone()),
            }),
            reply: ReplyTarget::Conversation,
        }
    }

    fn from_review_comment(e: &'a ReviewCommentCreatedEvent) -> Self {
        let c = &e.comment;
        let text = c.body.as_deref().unwrap_or_default();
        Self {
            sender: e.sender.as_ref(),
            text,
            pull_request: &e.pull_request,
            repository: &e.repository,
            details: EventDetails::ReviewComment(ReviewCommentDetails {
                body: text.to_string(),
                diff_hunk: c.diff_hunk.clone(),
                path: c.path.clone(),
                position: c.position,
                comment_id: c.id,
                commenter: c.user.as_ref().map(|u| u.login.clone()),
            }),
            reply: ReplyTarget::Thread { comment_id: c.id },
        }
    }

    fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.repository.owner.login, &self.repository.name)
    }

    fn pull_request_info(&self) -> PullRequestInfo {
        let pr = self.pull_request;
        PullRequestInfo {
            owner: self.repository.owner.login.clone(),
            repo: self.repository.name.clone(),
            repo_full_name: self.repository.full_name.clone(),
            pr_number: pr.number,
            pr_title: pr.title.clone(),
            pr_body: pr.body.clone(),
            pr_author: pr.user.as_ref().map(|u| u.login.clone()),
            base_sha: pr.base.sha.clone(),
            head_sha: pr.head.sha.clone(),
        }
    }
}

/// Routes review events to the backend and posts answers back.
///
/// Holds no per-event state; one instance serves concurrent deliveries.
#[derive(Debug, Clone)]
pub struct ReviewRouter {
    github: GitHubClient,
    notifier: BackendNotifier,
}

impl ReviewRouter {
    pub fn new(github: GitHubClient, notifier: BackendNotifier) -> Self {
        Self { github, notifier }
    }

    /// Handles an event and swallows any failure after logging it.
    ///
    /// Returns `None` when handling failed.
    pub async fn dispatch(&self, event: &WebhookEvent) -> Option<Outcome> {
        let label = event.label();
        match self.handle(event).await {
            Ok(outcome) => {
                info!(event = %label, ?outcome, "event handled");
                Some(outcome)
            }
            Err(err) => {
                error!(event = %label, error = %err, "event handling failed");
                None
            }
        }
    }

    /// Handles an event, reporting listing and posting failures.
    pub async fn handle(&self, event: &WebhookEvent) -> RouterResult<Outcome> {
        match event {
            WebhookEvent::ReviewSubmitted(e) => self.run(Trigger::from_review(e)).await,
            WebhookEvent::ReviewCommentCreated(e) => {
                self.run(Trigger::from_review_comment(e)).await
            }
            WebhookEvent::Ignored { .. } => Ok(Outcome::Skipped(SkipReason::Unhandled)),
        }
    }

    #[instrument(
        skip_all,
        fields(
            repo = %trigger.repository.full_name,
            pr = trigger.pull_request.number,
            kind = ?trigger.details.kind()
        )
    )]
    async fn run(&self, trigger: Trigger<'_>) -> RouterResult<Outcome> {
        if is_from_bot(trigger.sender) {
            debug!("ignoring bot-originated event");
            return Ok(Outcome::Skipped(SkipReason::Bot));
        }

        if trigger.text.trim().is_empty() {
            debug!("ignoring event with empty text");
            return Ok(Outcome::Skipped(SkipReason::EmptyText));
        }

        let repo = trigger.repo_ref();
        let pr = trigger.pull_request;
        let pr_ref = PullRequestRef {
            repo: repo.clone(),
            number: pr.number,
            base_sha: pr.base.sha.clone(),
            head_sha: pr.head.sha.clone(),
        };

        let files = self
            .github
            .collect_changed_files(&pr_ref)
            .await
            .map_err(RouterError::Listing)?;

        let payload = BackendPayload {
            pull_request: trigger.pull_request_info(),
            details: trigger.details,
            files,
        };

        let Some(comment) = self.notifier.notify(&payload).await else {
            debug!("backend returned no comment");
            return Ok(Outcome::NoComment);
        };

        let posted = match trigger.reply {
            ReplyTarget::Conversation => {
                self.github
                    .create_issue_comment(&repo, pr.number, &comment)
                    .await
            }
            ReplyTarget::Thread { comment_id } => {
                self.github
                    .create_review_comment_reply(&repo, pr.number, comment_id, &comment)
                    .await
            }
        };
        let comment_id = posted.map_err(RouterError::Post)?;

        info!(comment_id, "posted backend comment");
        Ok(Outcome::Posted { comment_id })
    }
}
