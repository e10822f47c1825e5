//! Pull request file collector.
//!
//! Lists every changed file of a pull request page by page and resolves
//! the before/after text of each one with the content fetcher.

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::types::{ChangedFile, FileStatus, PullRequestRef, RepoRef};

/// Page size used for `GET /pulls/{number}/files` (GitHub's maximum).
pub const FILES_PER_PAGE: usize = 100;

impl GitHubClient {
    /// Collects all changed files of a pull request with their content at
    /// the base and head commits.
    ///
    /// Listing stops at the first page holding fewer than
    /// [`FILES_PER_PAGE`] entries. Order follows the listing. Contents are
    /// fetched one file at a time; a failed lookup leaves that side `None`
    /// while a failed listing call is returned as an error.
    #[instrument(skip(self, pr), fields(repo = %pr.repo, pr = pr.number))]
    pub async fn collect_changed_files(
        &self,
        pr: &PullRequestRef,
    ) -> GitHubResult<Vec<ChangedFile>> {
        let listed = self.list_pull_request_files(&pr.repo, pr.number).await?;

        let mut files = Vec::with_capacity(listed.len());
        for entry in listed {
            let base_content = if entry.status.has_base() {
                let base_path = entry
                    .previous_filename
                    .as_deref()
                    .unwrap_or(&entry.filename);
                self.fetch_file_content(&pr.repo, base_path, &pr.base_sha)
                    .await
            } else {
                None
            };

            let head_content = if entry.status.has_head() {
                self.fetch_file_content(&pr.repo, &entry.filename, &pr.head_sha)
                    .await
            } else {
                None
            };

            files.push(ChangedFile {
                filename: entry.filename,
                previous_filename: entry.previous_filename,
                status: entry.status,
                additions: entry.additions,
                deletions: entry.deletions,
                changes: entry.changes,
                patch: entry.patch,
                base_content,
                head_content,
            });
        }

        info!(files = files.len(), "collected changed files");
        Ok(files)
    }

    /// Lists changed-file metadata across all pages.
    async fn list_pull_request_files(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> GitHubResult<Vec<PullRequestFile>> {
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            let batch = self.list_pull_request_files_page(repo, number, page).await?;
            let len = batch.len();
            all.extend(batch);

            if len < FILES_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    async fn list_pull_request_files_page(
        &self,
        repo: &RepoRef,
        number: u64,
        page: u32,
    ) -> GitHubResult<Vec<PullRequestFile>> {
        let url = self.repo_url(&repo.owner, &repo.repo, &format!("pulls/{number}/files"));
        debug!("GitHub list files: url={}, page={}", url, page);

        let per_page = FILES_PER_PAGE.to_string();
        let page = page.to_string();
        let files = self
            .get(&url)
            .query(&[("per_page", per_page.as_str()), ("page", page.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(files)
    }
}

/// Entry of `GET /pulls/{number}/files` (subset).
#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
    #[serde(default)]
    previous_filename: Option<String>,
    status: FileStatus,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    changes: u64,
    #[serde(default)]
    patch: Option<String>,
}
