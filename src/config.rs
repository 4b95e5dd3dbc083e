//! Site configuration assembled once at start-up.

use std::fmt;
use std::path::PathBuf;

/// Default repository owner when nothing is configured.
pub const DEFAULT_OWNER: &str = "ExistingPerson08";
/// Default repository name when nothing is configured.
pub const DEFAULT_REPO: &str = "homebrew-tap";
/// Default GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
/// Default site title.
pub const DEFAULT_SITE_NAME: &str = "Glowing Brew";
/// Default tagline shown under the title.
pub const DEFAULT_DESCRIPTION: &str = "Repository (tap) with Homebrew packages.";

/// Everything the generator needs to know about the tap and its output.
///
/// Built once by the command layer and passed by reference into the
/// pipeline and the live API adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name, e.g. `homebrew-tap`.
    pub repo: String,
    /// Optional access token sent as `Authorization: token ...`.
    pub token: Option<String>,
    /// REST API root without trailing slash.
    pub api_url: String,
    /// Directory receiving `index.html` and `packages/`.
    pub output_dir: PathBuf,
    /// Site title.
    pub site_name: String,
    /// Tagline shown under the title.
    pub description: String,
    /// Length of the "recently added" and "recently updated" lists.
    pub list_limit: usize,
    /// Number of commits inspected when computing package dates.
    pub commit_page_size: usize,
    /// Number of history entries shown per package.
    pub history_limit: usize,
}

impl SiteConfig {
    /// Creates a configuration for `owner/repo` with every other field at its default.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            site_name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            list_limit: 5,
            commit_page_size: 100,
            history_limit: 10,
        }
    }

    /// Resolves owner and repository from an optional explicit value, then the
    /// combined `owner/repo` form GitHub Actions exports, then the defaults.
    #[must_use]
    pub fn resolve_repository(
        owner: Option<String>,
        repo: Option<String>,
        combined: Option<&str>,
    ) -> (String, String) {
        let split = combined.and_then(|value| value.split_once('/'));
        let owner = owner
            .filter(|o| !o.is_empty())
            .or_else(|| split.map(|(o, _)| o.to_string()))
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let repo = repo
            .filter(|r| !r.is_empty())
            .or_else(|| split.map(|(_, r)| r.to_string()))
            .unwrap_or_else(|| DEFAULT_REPO.to_string());
        (owner, repo)
    }

    /// Sets the access token; empty strings are treated as absent.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the API root, trimming any trailing slash.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the site title.
    #[must_use]
    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }

    /// Sets the tagline shown under the title.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the length of the sidebar lists.
    #[must_use]
    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    /// Sets how many recent commits are inspected for package dates.
    #[must_use]
    pub fn with_commit_page_size(mut self, size: usize) -> Self {
        self.commit_page_size = size;
        self
    }

    /// Sets how many history entries each detail page shows.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// API path prefix for this repository, e.g. `repos/owner/repo`.
    #[must_use]
    pub fn repo_path(&self) -> String {
        format!("repos/{}/{}", self.owner, self.repo)
    }

    /// Public repository URL.
    #[must_use]
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}/{}/", self.owner, self.repo)
    }

    /// Name used with `brew tap`: the repository name without `homebrew-`.
    #[must_use]
    pub fn tap_name(&self) -> String {
        let short = self.repo.strip_prefix("homebrew-").unwrap_or(&self.repo);
        format!("{}/{short}", self.owner.to_lowercase())
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("output_dir", &self.output_dir)
            .field("site_name", &self.site_name)
            .field("list_limit", &self.list_limit)
            .field("commit_page_size", &self.commit_page_size)
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}
