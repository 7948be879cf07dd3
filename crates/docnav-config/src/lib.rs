//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files (or JSON files with the same
//! keys) with serde and provides auto-discovery of config files in parent
//! directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_path`
//! - `social_links[].url`

mod expand;

use std::path::{Path, PathBuf};

use docnav_tree::{
    DEFAULT_BASE_PATH, LinkPolicy, NavItem, NavigationConfig, NavigationTree, SocialLink,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base_path: Option<String>,
    /// Override whether warnings fail the check.
    pub warnings_as_errors: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Link normalization policy.
    pub links: LinkPolicy,
    /// Check behavior.
    pub check: CheckConfig,
    /// Primary navigation bar entries.
    #[serde(alias = "nav")]
    pub top_nav: Vec<NavItem>,
    /// Sidebar tree.
    pub sidebar: Vec<NavItem>,
    /// Social links.
    pub social_links: Vec<SocialLink>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// URL prefix the site is served under.
    #[serde(alias = "base")]
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base_path: DEFAULT_BASE_PATH.to_owned(),
        }
    }
}

/// Check configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Treat warnings as fatal.
    pub warnings_as_errors: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No config file given and none discovered.
    #[error("No {CONFIG_FILENAME} found in current directory or its parents")]
    NotDiscovered,
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_path`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if no config file can be found, or reading, parsing,
    /// expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or(ConfigError::NotDiscovered)?,
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path {
            self.site.base_path.clone_from(base_path);
        }
        if let Some(warnings_as_errors) = settings.warnings_as_errors {
            self.check.warnings_as_errors = warnings_as_errors;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    ///
    /// Files with a `.json` extension are parsed as JSON, anything else as TOML.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and expansion
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only checks the settings themselves; navigation entries are checked
    /// by [`NavigationTree`] when building.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_path, "site.base_path")?;
        if !self.site.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.base_path must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in path and URL fields.
    ///
    /// Free-text fields (title, description) are left as written.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_path = expand::expand_env(&self.site.base_path, "site.base_path")?;

        for (index, social) in self.social_links.iter_mut().enumerate() {
            social.url = expand::expand_env(&social.url, &format!("social_links[{index}].url"))?;
        }

        Ok(())
    }

    /// Tree builder using the configured link policy.
    pub fn tree_builder(&self) -> NavigationTree {
        NavigationTree::new().with_policy(self.links)
    }

    /// Navigation config handed to the tree builder.
    pub fn navigation(&self) -> NavigationConfig {
        NavigationConfig {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            base_path: self.site.base_path.clone(),
            top_nav: self.top_nav.clone(),
            sidebar: self.sidebar.clone(),
            social_links: self.social_links.clone(),
        }
    }

    /// Config file name for reports, or `<default>` when not loaded from a file.
    pub fn display_name(&self) -> String {
        self.config_path
            .as_deref()
            .map_or_else(|| "<default>".to_owned(), |path| path.display().to_string())
    }
}
