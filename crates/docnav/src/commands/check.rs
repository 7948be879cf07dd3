//! `docnav check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CONFIG_FILENAME, CliSettings, Config};
use docnav_tree::BuildError;
use rayon::prelude::*;

use super::report_issue;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Config files to check (default: auto-discover docnav.toml).
    files: Vec<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long, env = "DOCNAV_BASE_PATH")]
    base_path: Option<String>,

    /// Fail on warnings too.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (show build logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails to load or build, or has warnings
    /// while warnings are treated as errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_path: self.base_path,
            warnings_as_errors: self.strict.then_some(true),
        };

        let reports: Vec<FileReport> = if self.files.is_empty() {
            vec![check_file(None, &cli_settings)]
        } else {
            self.files
                .par_iter()
                .map(|path| check_file(Some(path.as_path()), &cli_settings))
                .collect()
        };

        for report in &reports {
            print_report(&output, report);
        }

        let failed = reports.iter().filter(|report| !report.passed()).count();
        let total = reports.len();

        output.separator();
        if failed > 0 {
            return Err(CliError::Check { failed, total });
        }
        output.success(&format!("{total} config file(s) ok"));
        Ok(())
    }
}

/// Result of checking a single config file.
#[derive(Debug)]
struct FileReport {
    name: String,
    outcome: Outcome,
}

#[derive(Debug)]
enum Outcome {
    /// Config built; warnings may remain.
    Valid {
        pages: usize,
        warnings: Vec<docnav_tree::ConfigError>,
        warnings_as_errors: bool,
    },
    /// Config loaded but navigation has fatal issues.
    Invalid(BuildError),
    /// Config could not be loaded.
    Unreadable(docnav_config::ConfigError),
}

impl FileReport {
    fn passed(&self) -> bool {
        match &self.outcome {
            Outcome::Valid {
                warnings,
                warnings_as_errors,
                ..
            } => !(*warnings_as_errors && !warnings.is_empty()),
            Outcome::Invalid(_) | Outcome::Unreadable(_) => false,
        }
    }
}

fn check_file(path: Option<&Path>, cli_settings: &CliSettings) -> FileReport {
    let fallback_name = path.map_or_else(
        || CONFIG_FILENAME.to_owned(),
        |path| path.display().to_string(),
    );

    let config = match Config::load(path, Some(cli_settings)) {
        Ok(config) => config,
        Err(err) => {
            return FileReport {
                name: fallback_name,
                outcome: Outcome::Unreadable(err),
            };
        }
    };

    let name = config.display_name();
    let outcome = match config.tree_builder().build(config.navigation()) {
        Ok(tree) => {
            let pages = tree.pages().count();
            tracing::info!(config = %name, pages, "Navigation built");
            Outcome::Valid {
                pages,
                warnings: tree.warnings().to_vec(),
                warnings_as_errors: config.check.warnings_as_errors,
            }
        }
        Err(err) => Outcome::Invalid(err),
    };

    FileReport { name, outcome }
}

fn print_report(output: &Output, report: &FileReport) {
    output.highlight(&report.name);
    match &report.outcome {
        Outcome::Valid {
            pages, warnings, ..
        } => {
            for warning in warnings {
                report_issue(output, warning);
            }
            if report.passed() {
                output.success(&format!("  ok ({pages} pages)"));
            } else {
                output.error(&format!(
                    "  {} warning(s) treated as errors",
                    warnings.len()
                ));
            }
        }
        Outcome::Invalid(err) => {
            for issue in err.issues() {
                report_issue(output, issue);
            }
            output.error(&format!("  {err}"));
        }
        Outcome::Unreadable(err) => output.error(&format!("  {err}")),
    }
}
