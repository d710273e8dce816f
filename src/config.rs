use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for release-prep.
///
/// Names the repository being released, the branches the workflow operates
/// on, and the files it rewrites.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Repository slug on the hosting service, "owner/name"
    #[serde(default)]
    pub repository: String,

    #[serde(default = "default_work_branch")]
    pub work_branch: String,

    #[serde(default = "default_release_base")]
    pub release_base: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub files: FilesConfig,
}

/// Returns the default branch releases are prepared from.
fn default_work_branch() -> String {
    "dev".to_string()
}

/// Returns the default base branch for the release pull request.
fn default_release_base() -> String {
    "master".to_string()
}

/// Returns the default git remote the release branch is pushed to.
fn default_remote() -> String {
    "origin".to_string()
}

/// Paths of the files the release workflow rewrites.
///
/// `source` and `manifest` are the two version-bearing metadata files;
/// `changelog` receives the new release section. All paths are relative to
/// the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_source_file")]
    pub source: String,

    #[serde(default = "default_manifest_file")]
    pub manifest: String,

    #[serde(default = "default_changelog_file")]
    pub changelog: String,
}

fn default_source_file() -> String {
    "source.extension.cs".to_string()
}

fn default_manifest_file() -> String {
    "source.extension.vsixmanifest".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            source: default_source_file(),
            manifest: default_manifest_file(),
            changelog: default_changelog_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: String::new(),
            work_branch: default_work_branch(),
            release_base: default_release_base(),
            remote: default_remote(),
            files: FilesConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaseprep.toml` in current directory
/// 3. `~/.config/.releaseprep.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releaseprep.toml").exists() {
        fs::read_to_string("./releaseprep.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releaseprep.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Reads the hosting API token from the `GITHUB_TOKEN` environment variable.
///
/// An empty value counts as absent. A missing token is not an error; later
/// API calls simply run unauthenticated.
pub fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
}
