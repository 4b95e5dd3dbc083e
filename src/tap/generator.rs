//! Site generation pipeline: discover, date, fetch, render, write.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::SiteConfig;
use crate::context::ServiceContext;
use crate::error::SiteError;
use crate::tap::description::{extract_description, MISSING_DESCRIPTION};
use crate::tap::discover::discover_packages;
use crate::tap::history::{package_history, walk_commit_window, PackageEvents, Rankings};
use crate::tap::render::{render_detail, render_index};
use crate::tap::{api, display_date, Package, PLACEHOLDER_DESCRIPTION};

/// Sub-directory of the output directory holding detail pages.
pub const PACKAGES_DIR: &str = "packages";
/// File name of the index page.
pub const INDEX_FILE: &str = "index.html";

/// Result of generating one package's detail page.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was written.
    Written {
        /// Package name.
        name: String,
        /// Path of the written file.
        path: PathBuf,
    },
    /// Fetching or writing failed; no page was written.
    Failed {
        /// Package name.
        name: String,
        /// What went wrong.
        error: SiteError,
    },
}

impl PageOutcome {
    /// Package the outcome belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Written { name, .. } | Self::Failed { name, .. } => name,
        }
    }

    /// Returns `true` if the page was written.
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Summary of a generation run.
#[derive(Debug)]
pub struct GenerationReport {
    /// Every package as listed on the index, including failed ones.
    pub packages: Vec<Package>,
    /// Sidebar lists rendered on the index.
    pub rankings: Rankings,
    /// One outcome per package, in discovery order.
    pub pages: Vec<PageOutcome>,
    /// Path of the written index page.
    pub index_path: PathBuf,
}

impl GenerationReport {
    /// Number of detail pages written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pages.iter().filter(|p| p.is_written()).count()
    }

    /// Outcomes of packages whose page could not be generated.
    pub fn failures(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages.iter().filter(|p| !p.is_written())
    }
}

/// Generates the whole site into `config.output_dir`.
///
/// Discovery and the commit walk are all-or-nothing. Failures while
/// building a single detail page are recorded in the report and the run
/// continues; the failed package still appears on the index.
///
/// # Errors
///
/// Returns an error if discovery, the commit walk, creating the output
/// directories, or writing the index fails.
pub async fn generate(
    ctx: &ServiceContext,
    config: &SiteConfig,
) -> Result<GenerationReport, SiteError> {
    let packages_dir = config.output_dir.join(PACKAGES_DIR);
    ctx.fs
        .create_dir_all(&packages_dir)
        .map_err(|source| SiteError::Io { path: packages_dir.clone(), source })?;

    let mut packages = discover_packages(ctx.github.as_ref(), config).await?;
    info!(count = packages.len(), "packages discovered");

    let events = walk_commit_window(ctx.github.as_ref(), config).await?;
    info!(dated = events.len(), "commit window inspected");
    apply_events(&mut packages, &events);
    let rankings = events.rankings(config.list_limit);

    let mut pages = Vec::with_capacity(packages.len());
    for package in &mut packages {
        let outcome = match build_detail_page(ctx, config, package, &packages_dir).await {
            Ok(path) => {
                info!(name = %package.name, kind = package.kind.label(), "page generated");
                PageOutcome::Written { name: package.name.clone(), path }
            }
            Err(error) => {
                error!(name = %package.name, error = %error, "page generation failed");
                PageOutcome::Failed { name: package.name.clone(), error }
            }
        };
        pages.push(outcome);
    }

    let index_path = config.output_dir.join(INDEX_FILE);
    let index = render_index(config, &packages, &rankings);
    write_page(ctx, &index_path, &index)?;
    info!(path = %index_path.display(), "index generated");

    Ok(GenerationReport { packages, rankings, pages, index_path })
}

/// Copies each package's latest update date from its event, if any.
fn apply_events(packages: &mut [Package], events: &PackageEvents) {
    for package in packages {
        if let Some(event) = events.get(&package.name) {
            package.last_update = display_date(&event.updated_at);
        }
    }
}

/// Fetches content and history for one package and writes its page.
///
/// Content that cannot be decoded leaves the page with empty content and
/// the missing-description fallback.
async fn build_detail_page(
    ctx: &ServiceContext,
    config: &SiteConfig,
    package: &mut Package,
    packages_dir: &Path,
) -> Result<PathBuf, SiteError> {
    match api::file_content(ctx.github.as_ref(), config, &package.path).await {
        Ok(content) => {
            if package.description == PLACEHOLDER_DESCRIPTION {
                package.description = extract_description(&content);
            }
            package.content = content;
        }
        Err(SiteError::Content { path, message }) => {
            warn!(path = %path, error = %message, "undecodable package content");
            if package.description == PLACEHOLDER_DESCRIPTION {
                package.description = MISSING_DESCRIPTION.to_string();
            }
            package.content = String::new();
        }
        Err(e) => return Err(e),
    }
    package.history = package_history(ctx.github.as_ref(), config, &package.path).await?;

    let path = packages_dir.join(format!("{}.html", package.name));
    write_page(ctx, &path, &render_detail(config, package))?;
    Ok(path)
}

fn write_page(ctx: &ServiceContext, path: &Path, html: &str) -> Result<(), SiteError> {
    ctx.fs
        .write(path, html)
        .map_err(|source| SiteError::Io { path: path.to_path_buf(), source })
}
