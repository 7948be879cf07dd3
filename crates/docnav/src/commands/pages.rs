//! `docnav pages` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_tree::FlatEntry;

use super::load_tree;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print entries as JSON.
    #[arg(long)]
    json: bool,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let tree = load_tree(self.config.as_deref(), &output)?;

        if self.json {
            let entries: Vec<FlatEntry<'_>> = tree.flatten().collect();
            output.data(&serde_json::to_string_pretty(&entries)?);
        } else {
            for entry in tree.flatten() {
                output.data(&format_entry(&entry));
            }
        }
        Ok(())
    }
}

/// One line per entry, indented two spaces per level.
fn format_entry(entry: &FlatEntry<'_>) -> String {
    let indent = "  ".repeat(entry.depth);
    match &entry.path {
        Some(path) => format!("{indent}{} -> {path}", entry.label),
        None => format!("{indent}{}", entry.label),
    }
}
