//! `docnav neighbors` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_tree::FlatEntry;

use super::load_tree;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the neighbors command.
#[derive(Args)]
pub(crate) struct NeighborsArgs {
    /// Page link, in any spelling that normalizes to a sidebar page.
    path: String,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NeighborsArgs {
    /// Execute the neighbors command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be built or `path` is not a
    /// sidebar page.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let tree = load_tree(self.config.as_deref(), &output)?;

        let neighbors = tree.neighbors(&self.path).ok_or_else(|| {
            CliError::Validation(format!(
                "{} is not a sidebar page",
                tree.resolver().resolve(&self.path)
            ))
        })?;

        output.data(&format_neighbor("prev", neighbors.prev.as_ref()));
        output.data(&format_neighbor("next", neighbors.next.as_ref()));
        Ok(())
    }
}

fn format_neighbor(direction: &str, entry: Option<&FlatEntry<'_>>) -> String {
    match entry.and_then(|entry| entry.path.as_ref().map(|path| (entry.label, path))) {
        Some((label, path)) => format!("{direction}: {label} ({path})"),
        None => format!("{direction}: -"),
    }
}
