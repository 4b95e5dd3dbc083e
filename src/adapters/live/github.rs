//! Live adapter for the `GitHubApi` port using the GitHub REST API.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::ApiError;
use crate::ports::github::{ApiFuture, GitHubApi};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("tapsite/", env!("CARGO_PKG_VERSION"));

/// Live GitHub client backed by `reqwest`.
pub struct LiveGitHubApi {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl LiveGitHubApi {
    /// Creates a client for the API root and token in `config`.
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        Self { client: Client::new(), api_url: config.api_url.clone(), token: config.token.clone() }
    }

    /// Full URL for a resource path.
    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.api_url, resource.trim_start_matches('/'))
    }
}

/// Error body returned by the GitHub API.
#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubApi for LiveGitHubApi {
    fn get(&self, resource: &str) -> ApiFuture<'_> {
        let resource = resource.to_string();
        let url = self.url_for(&resource);

        Box::pin(async move {
            debug!(url = %url, "GET");

            let mut request = self
                .client
                .get(&url)
                .header(ACCEPT, GITHUB_ACCEPT)
                .header(USER_AGENT, CLIENT_USER_AGENT);
            if let Some(token) = &self.token {
                request = request.header(AUTHORIZATION, format!("token {token}"));
            }

            let response = request.send().await.map_err(|e| ApiError::Transport {
                resource: resource.clone(),
                message: e.to_string(),
            })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| ApiError::Transport {
                resource: resource.clone(),
                message: format!("failed to read response body: {e}"),
            })?;

            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound { resource });
            }
            if !status.is_success() {
                let message = serde_json::from_str::<GitHubErrorBody>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                return Err(ApiError::Status { resource, status: status.as_u16(), message });
            }

            serde_json::from_str(&body)
                .map_err(|e| ApiError::Decode { resource, message: e.to_string() })
        })
    }
}
