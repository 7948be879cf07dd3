//! Positions of entries within a navigation config.

use std::fmt;

use serde::Serialize;

/// Top-level list an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tree {
    /// Primary navigation bar.
    TopNav,
    /// Sidebar tree.
    Sidebar,
    /// Social links list.
    SocialLinks,
}

impl Tree {
    /// Config key of this list.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopNav => "topNav",
            Self::Sidebar => "sidebar",
            Self::SocialLinks => "socialLinks",
        }
    }
}

/// Index path from a top-level list down to one entry.
///
/// Displayed the way the entry is addressed in the config, for example
/// `sidebar[1].children[0]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// List containing the root of the path.
    pub tree: Tree,
    /// Index at each nesting level, outermost first. Never empty.
    pub indices: Vec<usize>,
}

impl Location {
    /// Location of a top-level entry.
    #[must_use]
    pub fn root(tree: Tree, index: usize) -> Self {
        Self {
            tree,
            indices: vec![index],
        }
    }

    /// Location of the `index`-th child of this entry.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self {
            tree: self.tree,
            indices,
        }
    }

    /// Nesting depth, 0 for top-level entries.
    pub fn depth(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tree.as_str())?;
        for (level, index) in self.indices.iter().enumerate() {
            if level == 0 {
                write!(f, "[{index}]")?;
            } else {
                write!(f, ".children[{index}]")?;
            }
        }
        Ok(())
    }
}
