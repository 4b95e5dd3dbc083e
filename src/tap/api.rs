//! Typed views of the repository API resources the generator reads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::error::{ApiError, SiteError};
use crate::ports::github::GitHubApi;

/// Entry of a "list directory contents" response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File or directory name.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// `file`, `dir`, `symlink` or `submodule`.
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl DirectoryEntry {
    /// Returns `true` for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.entry_type == "file"
    }
}

/// "Get file content" response.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    /// Encoded file body.
    pub content: String,
    /// Encoding of `content`; GitHub always answers `base64` for files.
    #[serde(default)]
    pub encoding: String,
}

/// Name and timestamp of a commit author or committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name.
    pub name: String,
    /// ISO 8601 timestamp.
    pub date: String,
}

/// The git-level part of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit message.
    pub message: String,
    /// Who wrote the change.
    pub author: Signature,
    /// Who committed it.
    pub committer: Signature,
}

/// Item of a "list repository commits" response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitListItem {
    /// Commit hash.
    pub sha: String,
    /// Web permalink.
    pub html_url: String,
    /// Git-level metadata.
    pub commit: CommitInfo,
}

/// Change status of a file within one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// The file was created by the commit.
    Added,
    /// The file content changed.
    Modified,
    /// The file was deleted.
    Removed,
    /// The file was moved.
    Renamed,
    /// The file was copied.
    Copied,
    /// The file mode or type changed.
    Changed,
    /// Listed without changes.
    Unchanged,
    /// Any status not known to this version.
    #[serde(other)]
    Other,
}

/// File entry of a single-commit response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path after the change.
    pub filename: String,
    /// How the commit touched the file.
    pub status: ChangeStatus,
}

/// "Get single commit" response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Commit hash.
    pub sha: String,
    /// Git-level metadata.
    pub commit: CommitInfo,
    /// Files touched by the commit.
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

/// Fetches `resource` and deserializes the body into `T`.
async fn fetch<T: DeserializeOwned>(api: &dyn GitHubApi, resource: String) -> Result<T, ApiError> {
    let body = api.get(&resource).await?;
    serde_json::from_value(body).map_err(|e| ApiError::Decode { resource, message: e.to_string() })
}

/// Lists the contents of a repository directory.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the directory does not exist.
pub async fn list_directory(
    api: &dyn GitHubApi,
    config: &SiteConfig,
    directory: &str,
) -> Result<Vec<DirectoryEntry>, ApiError> {
    fetch(api, format!("{}/contents/{directory}", config.repo_path())).await
}

/// Lists the most recent commits of the repository, newest first, bounded
/// to one page of `config.commit_page_size` entries.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a commit list.
pub async fn list_commits(
    api: &dyn GitHubApi,
    config: &SiteConfig,
) -> Result<Vec<CommitListItem>, ApiError> {
    fetch(api, format!("{}/commits?per_page={}", config.repo_path(), config.commit_page_size))
        .await
}

/// Fetches one commit including its changed files.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a commit.
pub async fn commit_detail(
    api: &dyn GitHubApi,
    config: &SiteConfig,
    sha: &str,
) -> Result<CommitDetail, ApiError> {
    fetch(api, format!("{}/commits/{sha}", config.repo_path())).await
}

/// Lists the most recent commits touching `path`, newest first.
///
/// `path` is percent-encoded, so names such as `libsigc++.rb` survive the
/// query string.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a commit list.
pub async fn path_history(
    api: &dyn GitHubApi,
    config: &SiteConfig,
    path: &str,
) -> Result<Vec<CommitListItem>, ApiError> {
    let path = urlencoding::encode(path);
    fetch(
        api,
        format!("{}/commits?path={path}&per_page={}", config.repo_path(), config.history_limit),
    )
    .await
}

/// Fetches a file and returns its decoded text.
///
/// # Errors
///
/// Returns [`SiteError::Api`] if the request fails and [`SiteError::Content`]
/// if the payload is not base64-encoded UTF-8.
pub async fn file_content(
    api: &dyn GitHubApi,
    config: &SiteConfig,
    path: &str,
) -> Result<String, SiteError> {
    let file: FileContent = fetch(api, format!("{}/contents/{path}", config.repo_path())).await?;
    if !file.encoding.is_empty() && file.encoding != "base64" {
        return Err(SiteError::Content {
            path: path.to_string(),
            message: format!("unsupported encoding {:?}", file.encoding),
        });
    }
    decode_content(&file.content)
        .map_err(|message| SiteError::Content { path: path.to_string(), message })
}

/// Decodes a base64 payload as returned by the contents API.
///
/// GitHub wraps the encoded body in lines; all ASCII whitespace is ignored.
///
/// # Errors
///
/// Returns a message if the payload is not valid base64 or not UTF-8.
pub fn decode_content(encoded: &str) -> Result<String, String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| format!("invalid base64: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("content is not UTF-8: {e}"))
}
