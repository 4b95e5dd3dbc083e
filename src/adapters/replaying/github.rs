//! Replaying adapter for the `GitHubApi` port.

use std::sync::Mutex;

use tracing::warn;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ApiError;
use crate::ports::github::{ApiFuture, GitHubApi};

/// Serves recorded API responses from a cassette, in recording order.
pub struct ReplayingGitHubApi {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitHubApi {
    /// Creates a new replaying client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Pops the next recorded response, checking it was recorded for `resource`.
    fn next_response(&self, resource: &str) -> Result<serde_json::Value, ApiError> {
        let replay_failure =
            |message: String| ApiError::Decode { resource: resource.to_string(), message };

        let (recorded, output) = {
            let mut replayer =
                self.replayer.lock().map_err(|_| replay_failure("replayer lock poisoned".into()))?;
            let interaction = replayer.next_interaction("github", "get").map_err(replay_failure)?;
            let recorded = interaction
                .input
                .get("resource")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            (recorded, interaction.output.clone())
        };

        if recorded != resource {
            return Err(replay_failure(format!(
                "replay mismatch: expected request for {recorded:?}, got {resource:?}"
            )));
        }

        replay_result::<serde_json::Value, ApiError>(output).map_err(replay_failure)?
    }
}

impl Drop for ReplayingGitHubApi {
    fn drop(&mut self) {
        let Ok(replayer) = self.replayer.get_mut() else {
            return;
        };
        let remaining = replayer.remaining();
        if remaining > 0 {
            warn!(remaining, "cassette has interactions that were never requested");
        }
    }
}

impl GitHubApi for ReplayingGitHubApi {
    fn get(&self, resource: &str) -> ApiFuture<'_> {
        let response = self.next_response(resource);
        Box::pin(async move { response })
    }
}
