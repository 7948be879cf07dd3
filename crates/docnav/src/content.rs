//! Markdown content discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// A markdown file and the page path it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentPage {
    /// Page path relative to the site root (e.g., "", "domain", "domain/guide").
    pub url_path: String,
    /// Path to the source file.
    pub file: PathBuf,
}

/// Collect every markdown page under `source_dir`, sorted by page path.
///
/// Hidden files and directories are skipped.
pub(crate) fn scan(source_dir: &Path) -> std::io::Result<Vec<ContentPage>> {
    let mut pages = Vec::new();
    scan_directory(source_dir, "", &mut pages)?;
    pages.sort_by(|a, b| a.url_path.cmp(&b.url_path));
    Ok(pages)
}

fn scan_directory(
    dir: &Path,
    url_prefix: &str,
    pages: &mut Vec<ContentPage>,
) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let child_url = join_url(url_prefix, &name);
            scan_directory(&path, &child_url, pages)?;
        } else if let Some(stem) = name.strip_suffix(".md") {
            let url_path = if stem == "index" {
                url_prefix.to_owned()
            } else {
                join_url(url_prefix, stem)
            };
            pages.push(ContentPage {
                url_path,
                file: path,
            });
        }
    }
    Ok(())
}

fn join_url(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
