//! Data model shared by the fetcher, the collector and downstream payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Repository coordinate (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Returns `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A pull request pinned to the base/head commits its diff was computed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub repo: RepoRef,
    pub number: u64,
    pub base_sha: String,
    pub head_sha: String,
}

/// Per-file status as reported by `GET /pulls/{number}/files`.
///
/// Values GitHub may add later deserialize as [`FileStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

impl FileStatus {
    /// Whether the file exists at the base commit.
    pub fn has_base(self) -> bool {
        self != FileStatus::Added
    }

    /// Whether the file exists at the head commit.
    pub fn has_head(self) -> bool {
        self != FileStatus::Removed
    }
}

/// One changed file of a pull request with its before/after text.
///
/// `base_content` is always `None` for added files and `head_content` is
/// always `None` for removed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    /// Path at the base commit for renamed files.
    pub previous_filename: Option<String>,
    pub status: FileStatus,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    /// Unified diff; absent for binary or oversized diffs.
    pub patch: Option<String>,
    pub base_content: Option<String>,
    pub head_content: Option<String>,
}
