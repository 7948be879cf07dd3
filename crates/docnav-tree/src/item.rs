//! Navigation configuration data model.
//!
//! These are the plain data structures exchanged with the site generator.
//! Field names follow the generator's camelCase convention; snake_case and
//! VitePress-style names (`text`, `items`) are accepted as aliases.

use serde::{Deserialize, Serialize};

/// Default site base path.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Navigation entry: a page link, a grouping label with children, or both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display text.
    #[serde(alias = "text")]
    pub label: String,
    /// Link target, site-relative or absolute. `None` for grouping entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether the renderer should start this group collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries in display order.
    #[serde(default, alias = "items", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Create a leaf entry linking to a page.
    #[must_use]
    pub fn page(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Create a grouping entry without a link.
    #[must_use]
    pub fn group(label: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            children,
            ..Self::default()
        }
    }

    /// Attach children to this entry.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }

    /// Link target, ignoring blank links.
    pub fn target(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// True if the entry has nothing to navigate to.
    pub fn is_dead_end(&self) -> bool {
        self.target().is_none() && self.children.is_empty()
    }
}

/// Social link shown in the site header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Icon identifier (e.g., "github").
    pub icon: String,
    /// Target URL.
    pub url: String,
}

/// Root navigation configuration for one site build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// URL prefix under which the site is served (e.g., "/project-name/").
    #[serde(alias = "base_path", alias = "base")]
    pub base_path: String,
    /// Entries of the primary navigation bar.
    #[serde(alias = "top_nav", alias = "nav")]
    pub top_nav: Vec<NavItem>,
    /// Full sidebar tree.
    pub sidebar: Vec<NavItem>,
    /// Social links.
    #[serde(alias = "social_links")]
    pub social_links: Vec<SocialLink>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base_path: DEFAULT_BASE_PATH.to_owned(),
            top_nav: Vec::new(),
            sidebar: Vec::new(),
            social_links: Vec::new(),
        }
    }
}
