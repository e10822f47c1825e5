//! GitHub context for pull request reviews.
//!
//! A thin REST client that:
//!   * resolves the text of a file at a commit ([`GitHubClient::fetch_file_content`])
//!   * lists every changed file of a pull request with its base/head text
//!     ([`GitHubClient::collect_changed_files`])
//!   * posts conversation comments and inline-thread replies.
//!
//! No async-trait or trait objects; callers hold a cloneable [`GitHubClient`].

pub mod client;
mod comments;
pub mod contents;
pub mod errors;
pub mod files;
pub mod types;

pub use client::{DEFAULT_API_BASE, GitHubClient, GitHubConfig};
pub use errors::{GitHubError, GitHubResult};
pub use types::{ChangedFile, FileStatus, PullRequestRef, RepoRef};
