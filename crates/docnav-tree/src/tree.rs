//! Navigation tree building and validation.
//!
//! [`NavigationTree`] walks a [`NavigationConfig`] once, depth-first and in
//! declared order, normalizing every link and collecting every structural
//! issue. [`NavigationTree::build`] turns the config into a [`ValidatedTree`]
//! unless a fatal issue was found; warnings travel with the tree.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{BuildError, ConfigError};
use crate::flatten::{FlatEntry, FlatPages};
use crate::item::{NavItem, NavigationConfig, SocialLink};
use crate::link::{LinkPolicy, LinkResolver, NormalizedPath};
use crate::location::{Location, Tree};

/// Builds and validates navigation trees.
#[derive(Clone, Debug, Default)]
pub struct NavigationTree {
    policy: LinkPolicy,
}

impl NavigationTree {
    /// Create a builder with the default [`LinkPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link normalization policy.
    #[must_use]
    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check a config and return every issue found, in walk order.
    ///
    /// Returns an empty list for a clean config.
    pub fn validate(&self, config: &NavigationConfig) -> Vec<ConfigError> {
        let resolver = LinkResolver::new(&config.base_path, self.policy);
        Walk::run(config, &resolver).issues
    }

    /// Validate and normalize a config into a [`ValidatedTree`].
    ///
    /// All issues are collected before deciding: the error lists every fatal
    /// issue (plus any warnings), not just the first one.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any fatal issue was found.
    pub fn build(&self, config: NavigationConfig) -> Result<ValidatedTree, BuildError> {
        let resolver = LinkResolver::new(&config.base_path, self.policy);
        let Walk {
            issues,
            links,
            items,
            ..
        } = Walk::run(&config, &resolver);

        if issues.iter().any(ConfigError::is_fatal) {
            let err = BuildError::new(issues);
            tracing::debug!(errors = err.error_count(), "Navigation config rejected");
            return Err(err);
        }

        if !issues.is_empty() {
            tracing::warn!(warnings = issues.len(), "Navigation config built with warnings");
        }
        tracing::debug!(
            items,
            links = links.len(),
            warnings = issues.len(),
            "Navigation tree built"
        );

        Ok(ValidatedTree {
            config,
            resolver,
            links,
            warnings: issues,
        })
    }
}

/// State of a single validation pass over a config.
struct Walk<'a> {
    resolver: &'a LinkResolver,
    issues: Vec<ConfigError>,
    links: HashMap<NormalizedPath, Vec<Location>>,
    /// First sidebar entry seen for each internal link: (label, location).
    sidebar_first: HashMap<NormalizedPath, (&'a str, Location)>,
    items: usize,
}

impl<'a> Walk<'a> {
    fn run(config: &'a NavigationConfig, resolver: &'a LinkResolver) -> Self {
        let mut walk = Self {
            resolver,
            issues: Vec::new(),
            links: HashMap::new(),
            sidebar_first: HashMap::new(),
            items: 0,
        };

        for (tree, items) in [(Tree::TopNav, &config.top_nav), (Tree::Sidebar, &config.sidebar)] {
            for (index, item) in items.iter().enumerate() {
                walk.visit(item, Location::root(tree, index));
            }
        }
        for (index, social) in config.social_links.iter().enumerate() {
            walk.check_social(social, Location::root(Tree::SocialLinks, index));
        }

        walk
    }

    fn visit(&mut self, item: &'a NavItem, location: Location) {
        self.items += 1;

        if item.label.trim().is_empty() {
            self.issues.push(ConfigError::EmptyLabel {
                location: location.clone(),
            });
        }

        if item.is_dead_end() {
            self.issues.push(ConfigError::DeadEndEntry {
                label: item.label.clone(),
                location: location.clone(),
            });
        } else if let Some(link) = item.target() {
            self.record_link(item, link, &location);
        }

        for (index, child) in item.children.iter().enumerate() {
            self.visit(child, location.child(index));
        }
    }

    fn record_link(&mut self, item: &'a NavItem, link: &str, location: &Location) {
        if self.resolver.is_outside_base(link) {
            self.issues.push(ConfigError::OutOfBasePath {
                label: item.label.clone(),
                link: link.to_owned(),
                base_path: self.resolver.base_path(),
                location: location.clone(),
            });
        }

        let path = self.resolver.resolve(link);

        if location.tree == Tree::Sidebar && !path.is_external() {
            match self.sidebar_first.get(&path) {
                Some((first, first_location)) => {
                    self.issues.push(ConfigError::DuplicateLink {
                        path: path.clone(),
                        first: (*first).to_owned(),
                        first_location: first_location.clone(),
                        second: item.label.clone(),
                        location: location.clone(),
                    });
                }
                None => {
                    self.sidebar_first
                        .insert(path.clone(), (item.label.as_str(), location.clone()));
                }
            }
        }

        self.links.entry(path).or_default().push(location.clone());
    }

    fn check_social(&mut self, social: &SocialLink, location: Location) {
        if social.url.trim().is_empty() {
            self.issues.push(ConfigError::EmptySocialUrl {
                icon: social.icon.clone(),
                location,
            });
        }
    }
}

/// Previous and next pages around a page in sidebar reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Neighbors<'a> {
    /// Page before, `None` for the first page.
    pub prev: Option<FlatEntry<'a>>,
    /// Page after, `None` for the last page.
    pub next: Option<FlatEntry<'a>>,
}

/// Navigation config that passed validation.
///
/// Immutable. Holds the original config together with a lookup table from
/// normalized link to every entry (top nav and sidebar) that links there,
/// and the non-fatal warnings found while building.
#[derive(Debug, Serialize)]
pub struct ValidatedTree {
    #[serde(flatten)]
    config: NavigationConfig,
    #[serde(skip)]
    resolver: LinkResolver,
    #[serde(skip)]
    links: HashMap<NormalizedPath, Vec<Location>>,
    #[serde(skip)]
    warnings: Vec<ConfigError>,
}

impl ValidatedTree {
    /// Original config.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Consume into the original config.
    #[must_use]
    pub fn into_config(self) -> NavigationConfig {
        self.config
    }

    /// Sidebar entries.
    pub fn sidebar(&self) -> &[NavItem] {
        &self.config.sidebar
    }

    /// Top navigation entries.
    pub fn top_nav(&self) -> &[NavItem] {
        &self.config.top_nav
    }

    /// Social links.
    pub fn social_links(&self) -> &[SocialLink] {
        &self.config.social_links
    }

    /// Resolver used to normalize this tree's links.
    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// Non-fatal issues found while building.
    pub fn warnings(&self) -> &[ConfigError] {
        &self.warnings
    }

    /// Re-run validation over this tree.
    ///
    /// Only warnings can be returned, since fatal issues prevent building.
    pub fn validate(&self) -> Vec<ConfigError> {
        NavigationTree::new()
            .with_policy(self.resolver.policy())
            .validate(&self.config)
    }

    /// Normalized link of an entry, `None` for grouping entries.
    pub fn resolve_link(&self, item: &NavItem) -> Option<NormalizedPath> {
        item.target().map(|link| self.resolver.resolve(link))
    }

    /// Every entry linking to `link`, in walk order (top nav first).
    ///
    /// `link` is normalized before the lookup, so any equivalent spelling works.
    pub fn locations(&self, link: &str) -> Option<&[Location]> {
        self.links
            .get(self.resolver.resolve(link).as_str())
            .map(Vec::as_slice)
    }

    /// True if any entry links to `link`.
    pub fn contains(&self, link: &str) -> bool {
        self.locations(link).is_some()
    }

    /// All normalized links in the tree, in no particular order.
    pub fn links(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.links.keys()
    }

    /// Flatten the sidebar in pre-order, grouping entries included.
    ///
    /// Each call starts a fresh walk.
    pub fn flatten(&self) -> FlatPages<'_> {
        FlatPages::new(&self.config.sidebar, &self.resolver)
    }

    /// Addressable pages of the sidebar in reading order.
    ///
    /// Skips grouping entries and external links.
    pub fn pages(&self) -> impl Iterator<Item = FlatEntry<'_>> + Clone {
        self.flatten().filter(FlatEntry::is_page)
    }

    /// Previous and next pages around `link` in reading order.
    ///
    /// A plain link matches the first entry for that page, anchored or not.
    /// A link with a `?query` or `#fragment` only matches that exact entry.
    /// Returns `None` if `link` is not a sidebar page.
    pub fn neighbors(&self, link: &str) -> Option<Neighbors<'_>> {
        let target = self.resolver.resolve(link);
        let matches = |path: &NormalizedPath| {
            if target.has_suffix() {
                *path == target
            } else {
                path.page() == target.page()
            }
        };
        let mut pages = self.pages();
        let mut prev = None;

        while let Some(page) = pages.next() {
            if page.path.as_ref().is_some_and(matches) {
                return Some(Neighbors {
                    prev,
                    next: pages.next(),
                });
            }
            prev = Some(page);
        }
        None
    }

    /// Content paths that no sidebar page links to, in input order.
    ///
    /// Each path is normalized with this tree's resolver first, so source
    /// paths like `guide/setup.md` can be passed directly. A page counts as
    /// linked when any entry points at it, with or without an anchor.
    pub fn unreachable<I, S>(&self, paths: I) -> Vec<NormalizedPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let linked: Vec<NormalizedPath> = self.pages().filter_map(|page| page.path).collect();
        let reachable: HashSet<&str> = linked.iter().map(NormalizedPath::page).collect();

        paths
            .into_iter()
            .map(|path| self.resolver.resolve(path.as_ref()))
            .filter(|path| !reachable.contains(path.page()))
            .collect()
    }
}
