//! Sidebar flattening.
//!
//! [`FlatPages`] walks the sidebar in pre-order (a parent right before its
//! children, children in declared order) and yields one [`FlatEntry`] per
//! entry. Grouping entries are included with `path: None` so that
//! [`unflatten`] can rebuild the original nesting from depth and order alone.

use std::iter::FusedIterator;
use std::slice;

use serde::Serialize;

use crate::item::NavItem;
use crate::link::{LinkResolver, NormalizedPath};

/// One entry of a flattened sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlatEntry<'a> {
    /// Display text.
    pub label: &'a str,
    /// Normalized link, `None` for grouping entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<NormalizedPath>,
    /// Nesting depth, 0 for top-level entries.
    pub depth: usize,
}

impl FlatEntry<'_> {
    /// True if the entry is an addressable page of this site.
    pub fn is_page(&self) -> bool {
        self.path.as_ref().is_some_and(|path| !path.is_external())
    }
}

/// Lazy pre-order iterator over a sidebar.
///
/// A clone continues independently from the current position. Call
/// [`ValidatedTree::flatten`](crate::ValidatedTree::flatten) again to start over.
#[derive(Clone, Debug)]
pub struct FlatPages<'a> {
    resolver: &'a LinkResolver,
    stack: Vec<slice::Iter<'a, NavItem>>,
}

impl<'a> FlatPages<'a> {
    pub(crate) fn new(items: &'a [NavItem], resolver: &'a LinkResolver) -> Self {
        Self {
            resolver,
            stack: vec![items.iter()],
        }
    }
}

impl<'a> Iterator for FlatPages<'a> {
    type Item = FlatEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            let Some(item) = level.next() else {
                self.stack.pop();
                continue;
            };

            let entry = FlatEntry {
                label: &item.label,
                path: item.target().map(|link| self.resolver.resolve(link)),
                depth,
            };
            if !item.children.is_empty() {
                self.stack.push(item.children.iter());
            }
            return Some(entry);
        }
    }
}

impl FusedIterator for FlatPages<'_> {}

/// Error returned by [`unflatten`] for sequences that are not a pre-order walk.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnflattenError {
    /// Depth grows by more than one level between consecutive entries.
    #[error("entry {index} (\"{label}\") has depth {depth}, expected at most {max_depth}")]
    DepthJump {
        /// Position of the entry in the sequence.
        index: usize,
        /// Label of the entry.
        label: String,
        /// Depth of the entry.
        depth: usize,
        /// Largest depth allowed at this position.
        max_depth: usize,
    },
}

/// Rebuild a nested tree from a flattened sequence.
///
/// Each entry becomes a [`NavItem`] whose `link` is the normalized path.
/// The first entry must be at depth 0, and each following entry at most one
/// level deeper than the one before it.
pub fn unflatten<'a, I>(entries: I) -> Result<Vec<NavItem>, UnflattenError>
where
    I: IntoIterator<Item = FlatEntry<'a>>,
{
    let mut roots = Vec::new();
    // Open ancestors of the next entry, outermost first.
    let mut open: Vec<NavItem> = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.depth > open.len() {
            return Err(UnflattenError::DepthJump {
                index,
                label: entry.label.to_owned(),
                depth: entry.depth,
                max_depth: open.len(),
            });
        }
        while open.len() > entry.depth {
            close_last(&mut open, &mut roots);
        }
        open.push(NavItem {
            label: entry.label.to_owned(),
            link: entry.path.map(NormalizedPath::into_string),
            ..NavItem::default()
        });
    }
    while !open.is_empty() {
        close_last(&mut open, &mut roots);
    }

    Ok(roots)
}

/// Move the innermost open item into its parent, or into `roots`.
fn close_last(open: &mut Vec<NavItem>, roots: &mut Vec<NavItem>) {
    if let Some(item) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(item),
            None => roots.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sidebar() -> Vec<NavItem> {
        vec![
            NavItem::page("Intro", "/intro"),
            NavItem::group(
                "Device",
                vec![
                    NavItem::page("instance", "/vulkan/device/instance"),
                    NavItem::page("physical", "/vulkan/device/physical")
                        .with_children(vec![NavItem::page("queue", "/vulkan/device/queue")]),
                ],
            ),
            NavItem::page("Registry", "https://registry.khronos.org/vulkan/"),
        ]
    }

    fn entry(label: &'static str, path: Option<&str>, depth: usize) -> FlatEntry<'static> {
        let resolver = LinkResolver::default();
        FlatEntry {
            label,
            path: path.map(|p| resolver.resolve(p)),
            depth,
        }
    }

    #[test]
    fn test_flatten_pre_order_with_depth() {
        let items = sidebar();
        let resolver = LinkResolver::default();

        let flat: Vec<_> = FlatPages::new(&items, &resolver)
            .map(|e| (e.label, e.path.map(NormalizedPath::into_string), e.depth))
            .collect();

        assert_eq!(
            flat,
            vec![
                ("Intro", Some("/intro".to_owned()), 0),
                ("Device", None, 0),
                ("instance", Some("/vulkan/device/instance".to_owned()), 1),
                ("physical", Some("/vulkan/device/physical".to_owned()), 1),
                ("queue", Some("/vulkan/device/queue".to_owned()), 2),
                (
                    "Registry",
                    Some("https://registry.khronos.org/vulkan/".to_owned()),
                    0
                ),
            ]
        );
    }

    #[test]
    fn test_flatten_empty_sidebar() {
        let resolver = LinkResolver::default();

        assert_eq!(FlatPages::new(&[], &resolver).count(), 0);
    }

    #[test]
    fn test_flatten_is_fused() {
        let items = vec![NavItem::page("Only", "/only")];
        let resolver = LinkResolver::default();
        let mut pages = FlatPages::new(&items, &resolver);

        assert!(pages.next().is_some());
        assert!(pages.next().is_none());
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_flatten_uses_resolver_base_path() {
        let items = vec![NavItem::page("instance", "/vulkan/device/instance")];
        let resolver = LinkResolver::new("/hello_vulkan/", crate::LinkPolicy::default());

        let first = FlatPages::new(&items, &resolver).next().unwrap();

        assert_eq!(
            first.path.unwrap(),
            "/hello_vulkan/vulkan/device/instance"
        );
    }

    #[test]
    fn test_is_page() {
        assert!(entry("Intro", Some("/intro"), 0).is_page());
        assert!(!entry("Device", None, 0).is_page());
        assert!(!entry("Registry", Some("https://example.com"), 0).is_page());
    }

    #[test]
    fn test_unflatten_rebuilds_nesting() {
        let entries = vec![
            entry("Device", None, 0),
            entry("instance", Some("/instance"), 1),
            entry("queue", Some("/queue"), 2),
            entry("Pipeline", Some("/pipeline"), 0),
        ];

        let tree = unflatten(entries).unwrap();

        assert_eq!(
            tree,
            vec![
                NavItem::group(
                    "Device",
                    vec![
                        NavItem::page("instance", "/instance")
                            .with_children(vec![NavItem::page("queue", "/queue")])
                    ]
                ),
                NavItem::page("Pipeline", "/pipeline"),
            ]
        );
    }

    #[test]
    fn test_unflatten_empty() {
        assert_eq!(unflatten(Vec::new()).unwrap(), Vec::<NavItem>::new());
    }

    #[test]
    fn test_unflatten_rejects_first_entry_below_root() {
        let err = unflatten(vec![entry("Orphan", Some("/orphan"), 1)]).unwrap_err();

        assert_eq!(
            err,
            UnflattenError::DepthJump {
                index: 0,
                label: "Orphan".to_owned(),
                depth: 1,
                max_depth: 0,
            }
        );
    }

    #[test]
    fn test_unflatten_rejects_depth_jump() {
        let entries = vec![entry("A", Some("/a"), 0), entry("C", Some("/c"), 2)];

        let err = unflatten(entries).unwrap_err();

        assert!(matches!(err, UnflattenError::DepthJump { index: 1, .. }));
        assert!(err.to_string().contains("\"C\""));
    }

    #[test]
    fn test_flatten_then_unflatten_round_trip() {
        let items = sidebar();
        let resolver = LinkResolver::default();

        let rebuilt = unflatten(FlatPages::new(&items, &resolver)).unwrap();

        assert_eq!(rebuilt, items);
    }
}
