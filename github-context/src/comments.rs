//! Posting results back to a pull request.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::types::RepoRef;

impl GitHubClient {
    /// Creates a top-level conversation comment on a pull request.
    ///
    /// Pull requests are issues for this endpoint. Returns the new comment id.
    #[instrument(skip(self, repo, body), fields(repo = %repo))]
    pub async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> GitHubResult<u64> {
        let url = self.repo_url(&repo.owner, &repo.repo, &format!("issues/{number}/comments"));
        debug!("GitHub create issue comment: url={}", url);

        self.post_comment(&url, body).await
    }

    /// Replies in the thread of an inline review comment. Returns the new
    /// comment id.
    #[instrument(skip(self, repo, body), fields(repo = %repo))]
    pub async fn create_review_comment_reply(
        &self,
        repo: &RepoRef,
        number: u64,
        comment_id: u64,
        body: &str,
    ) -> GitHubResult<u64> {
        let url = self.repo_url(
            &repo.owner,
            &repo.repo,
            &format!("pulls/{number}/comments/{comment_id}/replies"),
        );
        debug!("GitHub create review comment reply: url={}", url);

        self.post_comment(&url, body).await
    }

    async fn post_comment(&self, url: &str, body: &str) -> GitHubResult<u64> {
        let created: CreatedComment = self
            .post(url)
            .json(&CommentCreate { body })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(created.id)
    }
}

#[derive(Debug, Serialize)]
struct CommentCreate<'a> {
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedComment {
    id: u64,
}
