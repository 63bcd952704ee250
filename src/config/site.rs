//! Blog configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    /// Moment-style pattern used when displaying post dates
    pub date_format: String,

    // Where posts come from
    pub source: SourceConfig,
    pub github: GithubConfig,
    pub manifest: ManifestConfig,
    pub fetch: FetchConfig,

    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            subtitle: String::new(),
            author: String::new(),
            language: "en".to_string(),
            date_format: "YYYY.MM.DD".to_string(),
            source: SourceConfig::default(),
            github: GithubConfig::default(),
            manifest: ManifestConfig::default(),
            fetch: FetchConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from a directory, or fall back to defaults
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join("_config.yml");
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("no _config.yml in {:?}, using defaults", base_dir.as_ref());
            Ok(Self::default())
        }
    }
}

/// Which strategy feeds the index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// List and download posts through the GitHub contents API
    #[default]
    Github,
    /// Read a pre-generated JSON manifest; bodies fetched per post
    Manifest,
}

/// Repository hosting the post files (`source.kind: github`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Repository directory holding the `*.md` posts
    pub dir: String,
    /// Optional read-only token for private repositories or rate limits
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: "username".to_string(),
            repo: "username.github.io".to_string(),
            branch: "main".to_string(),
            dir: "posts".to_string(),
            token: None,
        }
    }
}

/// Static host serving the manifest (`source.kind: manifest`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Base URL of the host the manifest lives on
    pub base_url: String,
    /// Manifest location relative to the base URL
    pub path: String,
    /// Directory holding the per-slug `*.md` bodies
    pub post_dir: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path: "posts/index.json".to_string(),
            post_dir: "posts".to_string(),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Concurrent downloads per batch during an index build
    pub batch: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch: 8,
            timeout_secs: 30,
            user_agent: format!("mdblog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
