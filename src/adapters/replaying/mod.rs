//! Replaying adapters that serve recorded interactions.

pub mod github;

pub use github::ReplayingGitHubApi;

use serde::de::DeserializeOwned;

/// Decodes a recorded `{"Ok": ..}` / `{"Err": ..}` output back into a `Result`.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T, E>(output: serde_json::Value) -> Result<Result<T, E>, String>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    serde_json::from_value(output).map_err(|e| format!("malformed recorded output: {e}"))
}
