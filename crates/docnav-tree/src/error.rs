//! Validation issues and build errors.

use serde::Serialize;

use crate::link::NormalizedPath;
use crate::location::Location;

/// How an issue affects the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but the tree is still usable.
    Warning,
    /// The tree must not be handed to the renderer.
    Error,
}

/// Structural problem found in a navigation config.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Entry has neither a link nor children.
    #[error("{location}: \"{label}\" has neither a link nor children")]
    DeadEndEntry {
        /// Label of the entry.
        label: String,
        /// Where the entry is.
        location: Location,
    },
    /// Two sidebar entries lead to the same page.
    #[error(
        "{location}: \"{second}\" links to {path}, already linked by \"{first}\" at {first_location}"
    )]
    DuplicateLink {
        /// Normalized link shared by both entries.
        path: NormalizedPath,
        /// Label of the entry seen first.
        first: String,
        /// Where the first entry is.
        first_location: Location,
        /// Label of the repeated entry.
        second: String,
        /// Where the repeated entry is.
        location: Location,
    },
    /// Entry label is empty or whitespace.
    #[error("{location}: entry has an empty label")]
    EmptyLabel {
        /// Where the entry is.
        location: Location,
    },
    /// Social link without a URL.
    #[error("{location}: social link \"{icon}\" has an empty url")]
    EmptySocialUrl {
        /// Icon of the social link.
        icon: String,
        /// Where the social link is.
        location: Location,
    },
    /// Absolute link written outside the configured base path.
    #[error("{location}: \"{label}\" links to {link}, which is outside base path {base_path}")]
    OutOfBasePath {
        /// Label of the entry.
        label: String,
        /// Link as written in the config.
        link: String,
        /// Configured base path.
        base_path: String,
        /// Where the entry is.
        location: Location,
    },
}

impl ConfigError {
    /// Severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            Self::OutOfBasePath { .. } => Severity::Warning,
            Self::DeadEndEntry { .. }
            | Self::DuplicateLink { .. }
            | Self::EmptyLabel { .. }
            | Self::EmptySocialUrl { .. } => Severity::Error,
        }
    }

    /// True if this issue prevents the build.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Location of the offending entry.
    pub fn location(&self) -> &Location {
        match self {
            Self::DeadEndEntry { location, .. }
            | Self::DuplicateLink { location, .. }
            | Self::EmptyLabel { location }
            | Self::EmptySocialUrl { location, .. }
            | Self::OutOfBasePath { location, .. } => location,
        }
    }
}

/// Returned by [`NavigationTree::build`](crate::NavigationTree::build) when
/// the config has at least one fatal issue.
///
/// Carries every issue found, fatal and non-fatal, in walk order.
#[derive(Debug, thiserror::Error)]
#[error("navigation config has {fatal} error(s)")]
pub struct BuildError {
    issues: Vec<ConfigError>,
    fatal: usize,
}

impl BuildError {
    pub(crate) fn new(issues: Vec<ConfigError>) -> Self {
        let fatal = issues.iter().filter(|issue| issue.is_fatal()).count();
        Self { issues, fatal }
    }

    /// All issues in walk order.
    pub fn issues(&self) -> &[ConfigError] {
        &self.issues
    }

    /// Fatal issues only.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.issues.iter().filter(|issue| issue.is_fatal())
    }

    /// Non-fatal issues only.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.issues.iter().filter(|issue| !issue.is_fatal())
    }

    /// Number of fatal issues.
    pub fn error_count(&self) -> usize {
        self.fatal
    }

    /// Consume into the issue list.
    #[must_use]
    pub fn into_issues(self) -> Vec<ConfigError> {
        self.issues
    }
}
