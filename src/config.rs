use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::{default_label_definitions, LabelDefinition};
use crate::error::{ReleaseError, Result};
use crate::version::VersionBump;

/// Represents the complete configuration for release-hooks.
///
/// Contains the label definition table, conventional commit rules, release
/// options and Slack delivery settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_label_definitions")]
    pub labels: Vec<LabelDefinition>,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub slack: SlackConfig,
}

/// Returns the default mapping of conventional commit types to version bumps.
fn default_commit_types() -> BTreeMap<String, VersionBump> {
    let mut types = BTreeMap::new();
    types.insert("feat".to_string(), VersionBump::Minor);
    types.insert("fix".to_string(), VersionBump::Patch);
    types.insert("perf".to_string(), VersionBump::Patch);
    types
}

/// Returns the default subject marker for breaking changes.
fn default_breaking_marker() -> String {
    "BREAKING".to_string()
}

/// Returns the default list of labels that suppress a release.
fn default_skip_release_labels() -> Vec<String> {
    vec!["skip-release".to_string()]
}

/// Configuration for conventional commit classification.
///
/// `types` maps a conventional commit type to the bump it implies; the label
/// attached is resolved through the label definition table.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_breaking_marker")]
    pub breaking_marker: String,

    #[serde(default = "default_commit_types")]
    pub types: BTreeMap<String, VersionBump>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            breaking_marker: default_breaking_marker(),
            types: default_commit_types(),
        }
    }
}

/// Release-wide options shared by plugins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_skip_release_labels")]
    pub skip_release_labels: Vec<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            skip_release_labels: default_skip_release_labels(),
        }
    }
}

/// Slack delivery settings.
///
/// The access token is never read from the configuration file; callers
/// supply it explicitly with [`SlackConfig::with_token`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SlackConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub project_url: Option<String>,

    #[serde(skip)]
    pub token: Option<String>,
}

impl SlackConfig {
    pub fn new(url: impl Into<String>) -> Self {
        SlackConfig {
            url: Some(url.into()),
            ..SlackConfig::default()
        }
    }

    /// Sets the access token; an empty string counts as no token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_project_url(mut self, project_url: impl Into<String>) -> Self {
        self.project_url = Some(project_url.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            labels: default_label_definitions(),
            conventional_commits: ConventionalCommitsConfig::default(),
            release: ReleaseConfig::default(),
            slack: SlackConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasehooks.toml` in current directory
/// 3. `.releasehooks.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasehooks.toml").exists() {
        fs::read_to_string("./releasehooks.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasehooks.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
