//! Package discovery from the tap's package directories.

use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::error::ApiError;
use crate::ports::github::GitHubApi;
use crate::tap::api::{self, DirectoryEntry};
use crate::tap::{package_name, Package, PackageKind, PACKAGE_EXTENSION};

/// Lists every package in the tap, formulae first, then casks.
///
/// A missing package directory contributes no packages. When two files share
/// a name, the later one replaces the earlier entry in place.
///
/// # Errors
///
/// Returns any API failure other than "not found".
pub async fn discover_packages(
    api: &dyn GitHubApi,
    config: &SiteConfig,
) -> Result<Vec<Package>, ApiError> {
    let mut packages: Vec<Package> = Vec::new();

    for kind in PackageKind::ALL {
        let directory = kind.directory();
        info!(directory, "scanning package directory");

        let entries = match api::list_directory(api, config, directory).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                warn!(directory, "package directory not found; skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        for package in packages_in(&entries, kind) {
            match packages.iter_mut().find(|p| p.name == package.name) {
                Some(existing) => {
                    warn!(name = %package.name, path = %package.path, "duplicate package name");
                    *existing = package;
                }
                None => packages.push(package),
            }
        }
    }

    Ok(packages)
}

/// Converts directory entries into placeholder packages of `kind`.
fn packages_in(entries: &[DirectoryEntry], kind: PackageKind) -> Vec<Package> {
    entries
        .iter()
        .filter(|entry| entry.is_file() && entry.name.ends_with(PACKAGE_EXTENSION))
        .map(|entry| Package::new(package_name(&entry.name), entry.path.clone(), kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::github::ApiFuture;
    use crate::tap::{PLACEHOLDER_DATE, PLACEHOLDER_DESCRIPTION};
    use serde_json::json;

    /// Answers directory listings from a fixed table; unknown paths are 404.
    struct Listings {
        formula: Result<serde_json::Value, ApiError>,
        casks: Result<serde_json::Value, ApiError>,
    }

    impl GitHubApi for Listings {
        fn get(&self, resource: &str) -> ApiFuture<'_> {
            let result = if resource.ends_with("/contents/Formula") {
                self.formula.clone()
            } else if resource.ends_with("/contents/Casks") {
                self.casks.clone()
            } else {
                Err(ApiError::NotFound { resource: resource.to_string() })
            };
            Box::pin(async move { result })
        }
    }

    fn entry(name: &str, dir: &str, kind: &str) -> serde_json::Value {
        json!({ "name": name, "path": format!("{dir}/{name}"), "type": kind })
    }

    fn config() -> SiteConfig {
        SiteConfig::new("acme", "homebrew-tap")
    }

    #[tokio::test]
    async fn collects_rb_files_from_both_directories() {
        let api = Listings {
            formula: Ok(json!([
                entry("foo.rb", "Formula", "file"),
                entry("README.md", "Formula", "file"),
                entry("nested.rb", "Formula", "dir"),
            ])),
            casks: Ok(json!([entry("bar.rb", "Casks", "file")])),
        };

        let packages = discover_packages(&api, &config()).await.unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "foo");
        assert_eq!(packages[0].path, "Formula/foo.rb");
        assert_eq!(packages[0].kind, PackageKind::Formula);
        assert_eq!(packages[0].description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(packages[0].last_update, PLACEHOLDER_DATE);
        assert_eq!(packages[1].name, "bar");
        assert_eq!(packages[1].kind, PackageKind::Cask);
    }

    #[tokio::test]
    async fn missing_directory_contributes_nothing() {
        let api = Listings {
            formula: Ok(json!([entry("foo.rb", "Formula", "file")])),
            casks: Err(ApiError::NotFound {
                resource: "repos/acme/homebrew-tap/contents/Casks".into(),
            }),
        };

        let packages = discover_packages(&api, &config()).await.unwrap();

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "foo");
    }

    #[tokio::test]
    async fn other_failures_abort_discovery() {
        let api = Listings {
            formula: Err(ApiError::Status {
                resource: "repos/acme/homebrew-tap/contents/Formula".into(),
                status: 500,
                message: "server error".into(),
            }),
            casks: Ok(json!([])),
        };

        let err = discover_packages(&api, &config()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn duplicate_names_keep_the_later_entry() {
        let api = Listings {
            formula: Ok(json!([entry("dup.rb", "Formula", "file")])),
            casks: Ok(json!([entry("dup.rb", "Casks", "file")])),
        };

        let packages = discover_packages(&api, &config()).await.unwrap();

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].kind, PackageKind::Cask);
        assert_eq!(packages[0].path, "Casks/dup.rb");
    }
}
