//! Tap model: packages discovered in the repository and their history.

pub mod api;
pub mod description;
pub mod discover;
pub mod generator;
pub mod history;
pub mod render;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// File extension of package definitions.
pub const PACKAGE_EXTENSION: &str = ".rb";
/// Description shown until the package content has been fetched.
pub const PLACEHOLDER_DESCRIPTION: &str = "Loading...";
/// Last-update value for packages without a known creation commit.
pub const PLACEHOLDER_DATE: &str = "Unknown";

/// The two kinds of package a tap can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// A formula, stored under `Formula/`.
    Formula,
    /// A cask, stored under `Casks/`.
    Cask,
}

impl PackageKind {
    /// All kinds, in the order their directories are scanned.
    pub const ALL: [Self; 2] = [Self::Formula, Self::Cask];

    /// Repository directory holding packages of this kind.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Formula => "Formula",
            Self::Cask => "Casks",
        }
    }

    /// Lower-case type label (`formula` or `cask`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Formula => "formula",
            Self::Cask => "cask",
        }
    }

    /// Kind owning a repository path such as `Casks/foo.rb`, if it is a
    /// package definition at all.
    #[must_use]
    pub fn for_path(path: &str) -> Option<Self> {
        if !path.ends_with(PACKAGE_EXTENSION) {
            return None;
        }
        Self::ALL.into_iter().find(|kind| {
            path.strip_prefix(kind.directory()).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// One entry of a package's change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Full commit message.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Display date (`DD. MM. YYYY`).
    pub date: String,
    /// Permalink to the commit on the web.
    pub url: String,
}

/// A package definition tracked by the tap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// File name without the `.rb` extension.
    pub name: String,
    /// Repository-relative path, e.g. `Formula/foo.rb`.
    pub path: String,
    /// Formula or cask.
    pub kind: PackageKind,
    /// Human-readable description.
    pub description: String,
    /// Display date of the latest change, or [`PLACEHOLDER_DATE`].
    pub last_update: String,
    /// Raw definition text, empty until fetched.
    pub content: String,
    /// Recent commits touching the file, newest first.
    pub history: Vec<CommitSummary>,
}

impl Package {
    /// Creates a package with placeholder description, date, and content.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: PackageKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            last_update: PLACEHOLDER_DATE.to_string(),
            content: String::new(),
            history: Vec::new(),
        }
    }

    /// `brew install` command for this package in the given tap repository.
    #[must_use]
    pub fn install_command(&self, owner: &str, repo: &str) -> String {
        match self.kind {
            PackageKind::Cask => format!("brew install --cask {owner}/{repo}/{}", self.name),
            PackageKind::Formula => format!("brew install {owner}/{repo}/{}", self.name),
        }
    }
}

/// Package name for a repository path: base name without `.rb`.
#[must_use]
pub fn package_name(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    base.strip_suffix(PACKAGE_EXTENSION).unwrap_or(base).to_string()
}

/// Parses an ISO 8601 timestamp as returned by the API.
///
/// # Errors
///
/// Returns [`SiteError::Date`] if the value is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SiteError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SiteError::Date { value: value.to_string() })
}

/// Formats a timestamp for display (`01. 06. 2024`).
#[must_use]
pub fn display_date(when: &DateTime<Utc>) -> String {
    when.format("%d. %m. %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_for_path_respects_whitelist_and_extension() {
        assert_eq!(PackageKind::for_path("Formula/foo.rb"), Some(PackageKind::Formula));
        assert_eq!(PackageKind::for_path("Casks/bar.rb"), Some(PackageKind::Cask));
        assert_eq!(PackageKind::for_path("Formula/readme.md"), None);
        assert_eq!(PackageKind::for_path("scripts/generate.rb"), None);
        assert_eq!(PackageKind::for_path("FormulaExtra/foo.rb"), None);
        assert_eq!(PackageKind::for_path("foo.rb"), None);
    }

    #[test]
    fn install_command_depends_on_kind() {
        let formula = Package::new("foo", "Formula/foo.rb", PackageKind::Formula);
        let cask = Package::new("bar", "Casks/bar.rb", PackageKind::Cask);
        assert_eq!(
            formula.install_command("acme", "homebrew-tap"),
            "brew install acme/homebrew-tap/foo"
        );
        assert_eq!(
            cask.install_command("acme", "homebrew-tap"),
            "brew install --cask acme/homebrew-tap/bar"
        );
    }

    #[test]
    fn new_package_has_placeholders() {
        let pkg = Package::new("foo", "Formula/foo.rb", PackageKind::Formula);
        assert_eq!(pkg.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(pkg.last_update, PLACEHOLDER_DATE);
        assert!(pkg.content.is_empty());
        assert!(pkg.history.is_empty());
    }

    #[test]
    fn package_name_strips_directory_and_extension() {
        assert_eq!(package_name("Formula/better-pkg.rb"), "better-pkg");
        assert_eq!(package_name("Casks/feedflow-linux.rb"), "feedflow-linux");
        assert_eq!(package_name("plain"), "plain");
    }

    #[test]
    fn timestamps_format_as_day_month_year() {
        let when = parse_timestamp("2024-06-01T08:30:00Z").unwrap();
        assert_eq!(display_date(&when), "01. 06. 2024");
        let offset = parse_timestamp("2024-01-01T23:30:00-02:00").unwrap();
        assert_eq!(display_date(&offset), "02. 01. 2024");
    }

    #[test]
    fn invalid_timestamp_is_an_error() {
        assert!(matches!(parse_timestamp("yesterday"), Err(SiteError::Date { .. })));
    }
}
