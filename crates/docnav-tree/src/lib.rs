//! Navigation tree model for docnav.
//!
//! This crate provides:
//! - [`NavigationConfig`] and [`NavItem`]: the navigation data handed over by the site generator
//! - [`LinkResolver`]: link normalization against the site base path
//! - [`NavigationTree`]: validation and building of a [`ValidatedTree`]
//! - [`FlatPages`] and [`unflatten`]: sidebar flattening in reading order
//!
//! The crate performs no I/O. Building is a pure function of the config.
//!
//! # Quick Start
//!
//! ```
//! use docnav_tree::{NavItem, NavigationConfig, NavigationTree};
//!
//! let config = NavigationConfig {
//!     base_path: "/hello_vulkan/".to_owned(),
//!     sidebar: vec![NavItem::group(
//!         "Device",
//!         vec![NavItem::page("instance", "/vulkan/device/instance")],
//!     )],
//!     ..NavigationConfig::default()
//! };
//!
//! let tree = NavigationTree::new().build(config).unwrap();
//!
//! let pages: Vec<_> = tree.pages().collect();
//! assert_eq!(pages[0].path.as_ref().unwrap().as_str(), "/hello_vulkan/vulkan/device/instance");
//!
//! // The link is outside the base path, which is reported but not fatal.
//! assert_eq!(tree.warnings().len(), 1);
//! ```

mod error;
mod flatten;
mod item;
mod link;
mod location;
mod tree;

pub use error::{BuildError, ConfigError, Severity};
pub use flatten::{FlatEntry, FlatPages, UnflattenError, unflatten};
pub use item::{DEFAULT_BASE_PATH, NavItem, NavigationConfig, SocialLink};
pub use link::{LinkPolicy, LinkResolver, NormalizedPath};
pub use location::{Location, Tree};
pub use tree::{NavigationTree, Neighbors, ValidatedTree};
