//! `tapsite generate` command.

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::cli::GenerateArgs;
use crate::config::SiteConfig;
use crate::context::ServiceContext;
use crate::tap::generator::{generate, GenerationReport, PageOutcome};

/// Records every API interaction of a live run into this cassette path.
pub const RECORD_ENV: &str = "TAPSITE_RECORD";

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error string if the cassette cannot be loaded, the runtime
/// cannot start, or a batch-level step of the pipeline fails.
pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let config = build_config(args, env::var("GITHUB_REPOSITORY").ok().as_deref());

    let ctx = if let Some(cassette) = &args.replay {
        ServiceContext::replaying(cassette)?
    } else if let Some(path) = env::var_os(RECORD_ENV) {
        ServiceContext::recording(&config, &PathBuf::from(path))
    } else {
        ServiceContext::live(&config)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    let report = runtime.block_on(generate(&ctx, &config)).map_err(|e| e.to_string())?;
    print_summary(&report);
    Ok(())
}

/// Builds the site configuration from parsed arguments.
///
/// `combined` is the `owner/repo` value GitHub Actions exports, consulted
/// when owner or repository are not given explicitly.
#[must_use]
pub fn build_config(args: &GenerateArgs, combined: Option<&str>) -> SiteConfig {
    let (owner, repo) =
        SiteConfig::resolve_repository(args.owner.clone(), args.repo.clone(), combined);
    let mut config = SiteConfig::new(owner, repo)
        .with_token(args.token.clone())
        .with_output_dir(args.output.clone());
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url.as_str());
    }
    if let Some(name) = &args.site_name {
        config = config.with_site_name(name.as_str());
    }
    if let Some(description) = &args.description {
        config = config.with_description(description.as_str());
    }
    if let Some(limit) = args.list_limit {
        config = config.with_list_limit(limit);
    }
    if let Some(size) = args.commit_page_size {
        config = config.with_commit_page_size(size);
    }
    if let Some(limit) = args.history_limit {
        config = config.with_history_limit(limit);
    }
    config
}

fn print_summary(report: &GenerationReport) {
    for outcome in report.failures() {
        if let PageOutcome::Failed { name, error } = outcome {
            warn!(name = %name, error = %error, "package skipped");
        }
    }
    println!(
        "Generated {} of {} package pages and {}",
        report.written(),
        report.pages.len(),
        report.index_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_URL, DEFAULT_OWNER};

    fn args() -> GenerateArgs {
        GenerateArgs {
            output: PathBuf::from("out"),
            owner: None,
            repo: None,
            token: None,
            api_url: None,
            site_name: None,
            description: None,
            list_limit: None,
            commit_page_size: None,
            history_limit: None,
            replay: None,
        }
    }

    #[test]
    fn combined_repository_fills_missing_owner_and_repo() {
        let config = build_config(&args(), Some("acme/homebrew-tools"));
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "homebrew-tools");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_flags_win() {
        let mut args = args();
        args.owner = Some("someone".into());
        args.api_url = Some("http://localhost:8080/".into());
        args.site_name = Some("Tools".into());
        args.token = Some("   ".into());

        let config = build_config(&args, Some("acme/homebrew-tools"));

        assert_eq!(config.owner, "someone");
        assert_eq!(config.repo, "homebrew-tools");
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.site_name, "Tools");
        assert!(config.token.is_none());
    }

    #[test]
    fn page_settings_reach_config() {
        let mut args = args();
        args.description = Some("Tools for acme.".into());
        args.list_limit = Some(3);
        args.commit_page_size = Some(30);
        args.history_limit = Some(4);

        let config = build_config(&args, None);

        assert_eq!(config.description, "Tools for acme.");
        assert_eq!(config.list_limit, 3);
        assert_eq!(config.commit_page_size, 30);
        assert_eq!(config.history_limit, 4);
    }

    #[test]
    fn defaults_without_any_source() {
        let config = build_config(&args(), None);
        assert_eq!(config.owner, DEFAULT_OWNER);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args();
        args.output = dir.path().join("site");
        args.replay = Some(dir.path().join("absent.cassette.yaml"));
        assert!(run(&args).is_err());
    }
}
