//! GitHub API port for read-only repository queries.

use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;

/// Boxed future type alias used by [`GitHubApi`] to keep the trait dyn-compatible.
pub type ApiFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>>;

/// Issues read requests against the repository-hosting API.
///
/// Abstracting the API allows deterministic replay of a recorded run and
/// testing without network access.
pub trait GitHubApi: Send + Sync {
    /// Fetches `resource` (a path relative to the API root, query string
    /// included) and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the resource does not exist and
    /// another [`ApiError`] variant for every other failure.
    fn get(&self, resource: &str) -> ApiFuture<'_>;
}
