//! Error types shared by the remote client and the generation pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single request against the repository API.
///
/// Serializable so that recorded cassettes keep the difference between a
/// missing resource and any other failure.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// The resource does not exist (HTTP 404).
    #[error("resource not found: {resource}")]
    NotFound {
        /// Resource path that was requested.
        resource: String,
    },
    /// The API answered with a non-success status other than 404.
    #[error("GitHub API error ({status}) for {resource}: {message}")]
    Status {
        /// Resource path that was requested.
        resource: String,
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API, or the raw body.
        message: String,
    },
    /// The request never produced a response.
    #[error("request for {resource} failed: {message}")]
    Transport {
        /// Resource path that was requested.
        resource: String,
        /// Underlying transport error.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("unexpected response for {resource}: {message}")]
    Decode {
        /// Resource path that was requested.
        resource: String,
        /// What went wrong while decoding.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` for the "resource not found" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while generating the site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A request against the repository API failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Writing generated output failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Fetched file content could not be decoded.
    #[error("could not decode content of {path}: {message}")]
    Content {
        /// Repository path of the file.
        path: String,
        /// Decoding failure.
        message: String,
    },
    /// A timestamp returned by the API was not valid ISO 8601.
    #[error("invalid timestamp {value:?}")]
    Date {
        /// Offending value.
        value: String,
    },
}
