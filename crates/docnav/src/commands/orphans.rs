//! `docnav orphans` command implementation.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use docnav_tree::{NormalizedPath, ValidatedTree};

use super::load_tree;
use crate::content::{self, ContentPage};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the orphans command.
#[derive(Args)]
pub(crate) struct OrphansArgs {
    /// Markdown content directory.
    content_dir: PathBuf,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl OrphansArgs {
    /// Execute the orphans command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be built or the content
    /// directory cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let tree = load_tree(self.config.as_deref(), &output)?;
        let pages = content::scan(&self.content_dir)?;

        let orphans = find_orphans(&tree, &pages);
        for (path, page) in &orphans {
            output.data(&format!("{path}\t{}", page.file.display()));
        }

        if orphans.is_empty() {
            output.success(&format!("All {} page(s) are in the sidebar", pages.len()));
        } else {
            output.warning(&format!(
                "{} of {} page(s) are not in the sidebar",
                orphans.len(),
                pages.len()
            ));
        }
        Ok(())
    }
}

/// Content pages the sidebar never links to, with their normalized paths.
fn find_orphans<'a>(
    tree: &ValidatedTree,
    pages: &'a [ContentPage],
) -> Vec<(NormalizedPath, &'a ContentPage)> {
    let unreachable: HashSet<NormalizedPath> = tree
        .unreachable(pages.iter().map(|page| page.url_path.as_str()))
        .into_iter()
        .collect();

    pages
        .iter()
        .map(|page| (tree.resolver().resolve(&page.url_path), page))
        .filter(|(path, _)| unreachable.contains(path))
        .collect()
}
