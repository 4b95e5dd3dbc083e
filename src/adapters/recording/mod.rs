//! Recording adapters that capture interactions to cassettes.

pub mod github;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using serde's `{"Ok": ..}` / `{"Err": ..}` encoding.
///
/// Mirror of `replaying::replay_result`. Both sides of the result must be
/// serializable so replay can reconstruct typed errors.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    let (input_json, output_json) = match (serde_json::to_value(input), serde_json::to_value(result))
    {
        (Ok(input), Ok(output)) => (input, output),
        (Err(e), _) | (_, Err(e)) => {
            warn!(port, method, error = %e, "skipping unserializable interaction");
            return;
        }
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(_) => warn!(port, method, "recorder lock poisoned; interaction dropped"),
    }
}
