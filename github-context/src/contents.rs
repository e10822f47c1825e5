//! Content fetcher: text of a single file at a given git ref.

use base64::Engine;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::client::GitHubClient;
use crate::errors::{GitHubContentError, GitHubResult};
use crate::types::RepoRef;

impl GitHubClient {
    /// Returns the UTF-8 text of `path` at `git_ref`, or `None`.
    ///
    /// `None` covers directories, entries without inline content
    /// (submodules, symlinks, oversized files), binary files and every
    /// transport or not-found failure. Failures are logged with `path` and
    /// `ref`; this function never returns an error.
    pub async fn fetch_file_content(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: &str,
    ) -> Option<String> {
        match self.try_fetch_file_content(repo, path, git_ref).await {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    repo = %repo,
                    path,
                    git_ref,
                    error = %err,
                    "failed to fetch file content"
                );
                None
            }
        }
    }

    /// Fallible core of [`GitHubClient::fetch_file_content`].
    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn try_fetch_file_content(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: &str,
    ) -> GitHubResult<Option<String>> {
        let tail = format!("contents/{}", encode_path(path));
        let url = self.repo_url(&repo.owner, &repo.repo, &tail);
        debug!("GitHub get contents: url={}, ref={}", url, git_ref);

        let resp: ContentsResponse = self
            .get(&url)
            .query(&[("ref", git_ref)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let entry = match resp {
            ContentsResponse::Listing(_) => {
                debug!("path resolves to a directory listing");
                return Ok(None);
            }
            ContentsResponse::Entry(entry) => entry,
        };

        let Some(content) = entry.content else {
            debug!(kind = ?entry.kind, "entry carries no inline content");
            return Ok(None);
        };

        Ok(Some(decode_content(&content, entry.encoding.as_deref())?))
    }
}

/// Decodes a contents-API payload into text.
///
/// `encoding` defaults to base64 when absent. Line breaks inside base64
/// payloads are ignored.
pub fn decode_content(content: &str, encoding: Option<&str>) -> Result<String, GitHubContentError> {
    let encoding = encoding.unwrap_or("base64");
    let bytes = match encoding.to_ascii_lowercase().as_str() {
        "base64" => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            base64::engine::general_purpose::STANDARD.decode(compact)?
        }
        "utf-8" | "utf8" => content.as_bytes().to_vec(),
        _ => return Err(GitHubContentError::UnsupportedEncoding(encoding.to_string())),
    };

    Ok(String::from_utf8(bytes)?)
}

/// Percent-encodes each path segment, keeping `/` separators.
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `GET /contents/{path}` answers with an array for directories and an
/// object for everything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<serde_json::Value>),
    Entry(ContentEntry),
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}
