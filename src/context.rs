//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::adapters::live::{LiveFileSystem, LiveGitHubApi};
use crate::adapters::recording::github::RecordingGitHubApi;
use crate::adapters::replaying::ReplayingGitHubApi;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::SiteConfig;
use crate::ports::filesystem::FileSystem;
use crate::ports::github::GitHubApi;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Repository API client.
    pub github: Box<dyn GitHubApi>,
    /// Filesystem receiving the generated pages.
    pub fs: Box<dyn FileSystem>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context talking to the API configured in `config`.
    #[must_use]
    pub fn live(config: &SiteConfig) -> Self {
        Self {
            github: Box::new(LiveGitHubApi::new(config)),
            fs: Box::new(LiveFileSystem),
            recorder: None,
        }
    }

    /// Creates a live context that also records every API interaction.
    ///
    /// The cassette is written to `path` when this context is dropped. This
    /// is the developer mechanism behind the `TAPSITE_RECORD` env var.
    #[must_use]
    pub fn recording(config: &SiteConfig, path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            "tapsite-session",
            format!("{}/{}", config.owner, config.repo),
        )));
        Self {
            github: Box::new(RecordingGitHubApi::new(
                Box::new(LiveGitHubApi::new(config)),
                Arc::clone(&recorder),
            )),
            fs: Box::new(LiveFileSystem),
            recorder: Some(recorder),
        }
    }

    /// Creates a context serving API responses from a cassette file.
    ///
    /// Output is still written to the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a context serving API responses from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        Self {
            github: Box::new(ReplayingGitHubApi::new(CassetteReplayer::new(cassette))),
            fs: Box::new(LiveFileSystem),
            recorder: None,
        }
    }

    /// Creates a context from arbitrary adapters.
    #[must_use]
    pub fn with_ports(github: Box<dyn GitHubApi>, fs: Box<dyn FileSystem>) -> Self {
        Self { github, fs, recorder: None }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(recorder) = recorder.lock() else {
            warn!("recorder lock poisoned; cassette not written");
            return;
        };
        match recorder.save() {
            Ok(path) => {
                info!(path = %path.display(), interactions = recorder.len(), "cassette written");
            }
            Err(e) => warn!(error = %e, "failed to write cassette"),
        }
    }
}
