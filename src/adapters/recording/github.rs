//! Recording adapter for the `GitHubApi` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::github::{ApiFuture, GitHubApi};

/// Records API interactions while delegating to an inner implementation.
pub struct RecordingGitHubApi {
    inner: Box<dyn GitHubApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitHubApi {
    /// Creates a new recording client wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn GitHubApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
pub(crate) struct ResourceInput<'a> {
    pub(crate) resource: &'a str,
}

impl GitHubApi for RecordingGitHubApi {
    fn get(&self, resource: &str) -> ApiFuture<'_> {
        let resource = resource.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.get(&resource).await;
            record_result(
                &recorder,
                "github",
                "get",
                &ResourceInput { resource: &resource },
                &result,
            );
            result
        })
    }
}
