//! Package creation and update dates derived from the commit window.
//!
//! Only the most recent page of repository commits is inspected. Packages
//! created before that window never get an event and keep their placeholder
//! date.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::ports::github::GitHubApi;
use crate::tap::api::{self, ChangeStatus, ChangedFile, CommitListItem};
use crate::tap::{display_date, package_name, parse_timestamp, CommitSummary, PackageKind};

/// Files touched by one commit, with the commit's timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitChanges {
    /// Committer timestamp.
    pub date: DateTime<Utc>,
    /// Changed files and their status.
    pub files: Vec<ChangedFile>,
}

/// Creation and latest-update time of one package within the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEvent {
    /// Package name.
    pub name: String,
    /// Date of the commit that added the package file.
    pub created_at: DateTime<Utc>,
    /// Date of the latest commit touching the file; never before `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl PackageEvent {
    /// Event for a package added at `date`.
    fn added(name: String, date: DateTime<Utc>) -> Self {
        Self { name, created_at: date, updated_at: date }
    }

    /// Same event, touched again at `date`.
    fn touched(&self, date: DateTime<Utc>) -> Self {
        Self { updated_at: self.updated_at.max(date), ..self.clone() }
    }

    /// Returns `true` if the package changed after it was added.
    #[must_use]
    pub fn was_updated(&self) -> bool {
        self.created_at != self.updated_at
    }
}

/// Name and display date in a sidebar list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Package name.
    pub name: String,
    /// Display date.
    pub date: String,
}

/// The two sidebar lists of the index page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    /// Newest packages first.
    pub recently_added: Vec<RankedEntry>,
    /// Most recently changed packages first; excludes never-changed packages.
    pub recently_updated: Vec<RankedEntry>,
}

/// Immutable mapping from package name to its event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEvents {
    events: BTreeMap<String, PackageEvent>,
}

impl PackageEvents {
    /// Folds commits, given oldest first, into package events.
    ///
    /// A package gets an event at the first commit that adds its file; every
    /// later commit touching the file, whatever its status, advances the
    /// update time. Commits touching a package before it was seen as added
    /// are ignored.
    #[must_use]
    pub fn from_commits<I>(commits_oldest_first: I) -> Self
    where
        I: IntoIterator<Item = CommitChanges>,
    {
        let events = commits_oldest_first.into_iter().fold(BTreeMap::new(), |events, commit| {
            commit
                .files
                .iter()
                .filter(|file| PackageKind::for_path(&file.filename).is_some())
                .fold(events, |mut events, file| {
                    let name = package_name(&file.filename);
                    let next = match events.get(&name) {
                        Some(event) => Some(PackageEvent::touched(event, commit.date)),
                        None if file.status == ChangeStatus::Added => {
                            Some(PackageEvent::added(name.clone(), commit.date))
                        }
                        None => None,
                    };
                    if let Some(event) = next {
                        events.insert(name, event);
                    }
                    events
                })
        });
        Self { events }
    }

    /// Event for `name`, if the package was added within the window.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageEvent> {
        self.events.get(name)
    }

    /// Number of packages with an event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no package was added within the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Builds the sidebar lists, each truncated to `limit` entries.
    ///
    /// Ties are broken by package name.
    #[must_use]
    pub fn rankings(&self, limit: usize) -> Rankings {
        let mut added: Vec<&PackageEvent> = self.events.values().collect();
        added.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.name.cmp(&b.name)));

        let mut updated: Vec<&PackageEvent> =
            self.events.values().filter(|e| e.was_updated()).collect();
        updated.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));

        Rankings {
            recently_added: added
                .into_iter()
                .take(limit)
                .map(|e| RankedEntry { name: e.name.clone(), date: display_date(&e.created_at) })
                .collect(),
            recently_updated: updated
                .into_iter()
                .take(limit)
                .map(|e| RankedEntry { name: e.name.clone(), date: display_date(&e.updated_at) })
                .collect(),
        }
    }
}

/// Walks the commit window oldest first and derives package events.
///
/// # Errors
///
/// Any failed request or malformed timestamp aborts the walk.
pub async fn walk_commit_window(
    api: &dyn GitHubApi,
    config: &SiteConfig,
) -> Result<PackageEvents, SiteError> {
    let commits = api::list_commits(api, config).await?;
    debug!(count = commits.len(), "inspecting commit window");

    let mut changes = Vec::with_capacity(commits.len());
    for item in commits.iter().rev() {
        let detail = api::commit_detail(api, config, &item.sha).await?;
        let date = parse_timestamp(&detail.commit.committer.date)?;
        debug!(sha = %detail.sha, files = detail.files.len(), "commit inspected");
        changes.push(CommitChanges { date, files: detail.files });
    }

    Ok(PackageEvents::from_commits(changes))
}

/// Fetches the recent change history of one package file, newest first.
///
/// # Errors
///
/// Returns an error if the request fails or a commit date is malformed.
pub async fn package_history(
    api: &dyn GitHubApi,
    config: &SiteConfig,
    path: &str,
) -> Result<Vec<CommitSummary>, SiteError> {
    api::path_history(api, config, path)
        .await?
        .into_iter()
        .take(config.history_limit)
        .map(|item| summarize(&item))
        .collect()
}

fn summarize(item: &CommitListItem) -> Result<CommitSummary, SiteError> {
    Ok(CommitSummary {
        message: item.commit.message.clone(),
        author: item.commit.author.name.clone(),
        date: display_date(&parse_timestamp(&item.commit.author.date)?),
        url: item.html_url.clone(),
    })
}
