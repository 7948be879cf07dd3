//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod neighbors;
pub(crate) mod orphans;
pub(crate) mod pages;

pub(crate) use check::CheckArgs;
pub(crate) use neighbors::NeighborsArgs;
pub(crate) use orphans::OrphansArgs;
pub(crate) use pages::PagesArgs;

use std::path::Path;

use docnav_config::Config;
use docnav_tree::{Severity, ValidatedTree};

use crate::error::CliError;
use crate::output::Output;

/// Load the config and build its navigation tree.
///
/// Every issue is printed: warnings before returning the tree, all issues
/// when the build fails.
pub(crate) fn load_tree(
    config_path: Option<&Path>,
    output: &Output,
) -> Result<ValidatedTree, CliError> {
    let config = Config::load(config_path, None)?;
    match config.tree_builder().build(config.navigation()) {
        Ok(tree) => {
            for warning in tree.warnings() {
                report_issue(output, warning);
            }
            Ok(tree)
        }
        Err(err) => {
            for issue in err.issues() {
                report_issue(output, issue);
            }
            Err(err.into())
        }
    }
}

/// Print a navigation issue colored by severity.
pub(crate) fn report_issue(output: &Output, issue: &docnav_tree::ConfigError) {
    match issue.severity() {
        Severity::Error => output.error(&format!("  error: {issue}")),
        Severity::Warning => output.warning(&format!("  warning: {issue}")),
    }
}
