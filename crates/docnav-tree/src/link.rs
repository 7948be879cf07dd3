//! Link normalization.
//!
//! Every internal link is rewritten into one canonical absolute form so that
//! equivalent spellings of the same page compare equal:
//!
//! - relative links resolve against the base path
//! - absolute links not already rooted under the base path get it prepended
//! - duplicate slashes collapse, `.` and `..` segments resolve (never above the base)
//! - `index`, `index.md` and `index.html` suffixes are dropped
//! - `.md` and `.html` extensions are dropped
//! - trailing slashes are dropped
//!
//! The last three rules are switchable through [`LinkPolicy`].
//! Query strings and fragments are kept verbatim after the normalized path.
//! External links (`https://`, `mailto:`, ...) pass through unchanged.
//!
//! # Example
//!
//! ```
//! use docnav_tree::{LinkPolicy, LinkResolver};
//!
//! let resolver = LinkResolver::new("/hello_vulkan/", LinkPolicy::default());
//! let path = resolver.resolve("/vulkan/device/instance/");
//! assert_eq!(path.as_str(), "/hello_vulkan/vulkan/device/instance");
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefixes of links that point outside the site.
const EXTERNAL_PREFIXES: [&str; 5] = ["http://", "https://", "//", "mailto:", "tel:"];

/// File names treated as a directory's landing page.
const INDEX_NAMES: [&str; 3] = ["index", "index.md", "index.html"];

/// Page extensions dropped from links.
const PAGE_EXTENSIONS: [&str; 2] = [".md", ".html"];

/// Switches for the equivalence rules applied during normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    /// Treat `/a/` and `/a` as the same page.
    pub trailing_slash_equivalent: bool,
    /// Treat `/a/index` (and `index.md`, `index.html`) as `/a/`.
    pub strip_index: bool,
    /// Treat `/a/page.md` and `/a/page.html` as `/a/page`.
    pub strip_extension: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            trailing_slash_equivalent: true,
            strip_index: true,
            strip_extension: true,
        }
    }
}

/// A link in canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Path as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// True if the link points outside the site.
    pub fn is_external(&self) -> bool {
        is_external(&self.0)
    }

    /// Page part of the link, without `?query` or `#fragment`.
    ///
    /// External links are returned whole.
    pub fn page(&self) -> &str {
        if self.is_external() {
            &self.0
        } else {
            split_suffix(&self.0).0
        }
    }

    /// True if the link carries a `?query` or `#fragment`.
    pub fn has_suffix(&self) -> bool {
        self.page().len() != self.0.len()
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Check whether a raw link points outside the site.
fn is_external(link: &str) -> bool {
    EXTERNAL_PREFIXES
        .iter()
        .any(|prefix| link.starts_with(prefix))
}

/// Split a link into its path and its `?query`/`#fragment` suffix.
fn split_suffix(link: &str) -> (&str, &str) {
    match link.find(['?', '#']) {
        Some(pos) => link.split_at(pos),
        None => (link, ""),
    }
}

/// Split a path into segments, dropping empty and `.` segments and applying `..`.
///
/// `..` at the top is ignored so the result never escapes its root.
fn collapse(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments
}

/// Resolves raw links into [`NormalizedPath`]s for one site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkResolver {
    /// Base path without trailing slash, empty for the site root.
    base: String,
    policy: LinkPolicy,
}

impl LinkResolver {
    /// Create a resolver for a base path such as `/` or `/project-name/`.
    #[must_use]
    pub fn new(base_path: &str, policy: LinkPolicy) -> Self {
        let segments = collapse(base_path);
        let base = if segments.is_empty() {
            String::new()
        } else {
            format!("/{}", segments.join("/"))
        };
        Self { base, policy }
    }

    /// Normalization policy in use.
    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Base path in `/name/` form (`/` for the site root).
    pub fn base_path(&self) -> String {
        format!("{}/", self.base)
    }

    /// True if the site is served under a prefix other than `/`.
    pub fn has_custom_base(&self) -> bool {
        !self.base.is_empty()
    }

    /// True if `link` is an absolute internal link that is not rooted under
    /// the base path.
    ///
    /// Always false for the default base path, relative links and external links.
    pub fn is_outside_base(&self, link: &str) -> bool {
        if !self.has_custom_base() || is_external(link) {
            return false;
        }
        let (path, _) = split_suffix(link);
        path.starts_with('/') && !self.is_rooted(&collapse(path))
    }

    /// Normalize a raw link.
    ///
    /// Pure and idempotent: resolving an already resolved path returns it unchanged.
    #[must_use]
    pub fn resolve(&self, link: &str) -> NormalizedPath {
        if is_external(link) {
            return NormalizedPath(link.to_owned());
        }

        let (path, suffix) = split_suffix(link);
        let raw = collapse(path);
        let base = collapse(&self.base);
        let base_len = base.len();

        let mut segments = if path.starts_with('/') && self.is_rooted(&raw) {
            raw
        } else {
            let mut joined = base;
            joined.extend(raw);
            joined
        };

        let mut directory = path.ends_with('/');
        // Base segments are never stripped, only what follows them.
        while segments.len() > base_len {
            let last_idx = segments.len() - 1;
            let last = segments[last_idx];
            if self.policy.strip_index && INDEX_NAMES.contains(&last) {
                segments.pop();
                directory = true;
                continue;
            }
            if self.policy.strip_extension
                && let Some(stem) = strip_page_extension(last)
            {
                segments[last_idx] = stem;
                continue;
            }
            break;
        }

        let mut out = String::with_capacity(link.len() + self.base.len() + 1);
        for segment in &segments {
            out.push('/');
            out.push_str(segment);
        }
        if out.is_empty() || (directory && !self.policy.trailing_slash_equivalent) {
            out.push('/');
        }
        out.push_str(suffix);
        NormalizedPath(out)
    }

    /// Check whether collapsed segments start with the base path segments.
    fn is_rooted(&self, segments: &[&str]) -> bool {
        let base = collapse(&self.base);
        segments.starts_with(&base)
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new(crate::item::DEFAULT_BASE_PATH, LinkPolicy::default())
    }
}

/// Strip a page extension unless the remaining name would be empty, `.` or `..`.
fn strip_page_extension(segment: &str) -> Option<&str> {
    PAGE_EXTENSIONS
        .iter()
        .find_map(|ext| segment.strip_suffix(ext))
        .filter(|stem| !matches!(*stem, "" | "." | ".."))
}
