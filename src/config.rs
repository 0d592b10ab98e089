//! Site configuration management for `site.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site url and title                             |
//! | `[author]`  | Author metadata shown across the site          |
//! | `[seo]`     | Default SEO metadata (per-page seo overrides)  |
//! | `[content]` | Content source directory                       |
//! | `[serve]`   | Development server (interface, port)           |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://cupofcraft.dev"
//!
//! [author]
//! name = "Andrea Barghigiani"
//!
//! [serve]
//! port = 5277
//! ```
//!
//! Every section has defaults reproducing the live site, so a missing or
//! partial `site.toml` still yields a usable configuration.

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Base URL used whenever the config does not provide one.
pub const DEFAULT_BASE_URL: &str = "https://cupofcraft.dev";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build mode, derived from the CLI command.
///
/// `serve` runs in development mode (drafts visible); everything else is a
/// production pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing site.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Basic site information
    pub base: BaseConfig,

    /// Author metadata
    pub author: AuthorConfig,

    /// Default SEO metadata
    pub seo: SeoDefaults,

    /// Content source settings
    pub content: ContentConfig,

    /// Development server settings
    pub serve: ServeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::from("./"),
            base: BaseConfig::default(),
            author: AuthorConfig::default(),
            seo: SeoDefaults::default(),
            content: ContentConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

/// Basic site information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Site base URL, e.g. `https://cupofcraft.dev`
    pub url: Option<String>,

    /// Site title
    pub title: String,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_BASE_URL.to_owned()),
            title: "cupofcraft".to_owned(),
        }
    }
}

/// Author metadata shown across the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub headline: String,
    /// Avatar image path, relative to the project root
    pub avatar: PathBuf,
    pub username: Option<String>,
    pub location: Option<String>,
    pub pronouns: Option<String>,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Andrea Barghigiani".to_owned(),
            headline: "Frontend and Product Engineer".to_owned(),
            avatar: PathBuf::from("src/assets/images/me.png"),
            username: Some("cupofcraft".to_owned()),
            location: Some("Palermo".to_owned()),
            pronouns: Some("He/Him".to_owned()),
        }
    }
}

/// Default SEO metadata, overridden per page by content `seo` blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoDefaults {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub keywords: Option<String>,
    pub canonical_url: Option<String>,
    pub robots: Option<String>,
    pub twitter: TwitterDefaults,
}

impl Default for SeoDefaults {
    fn default() -> Self {
        Self {
            title: "cupofcraft | The lab of Andrea Barghigiani".to_owned(),
            description: "Virtual space where Andrea shows the projects he's more proud \
                          of and writes about his leanings."
                .to_owned(),
            kind: Some("website".to_owned()),
            keywords: None,
            canonical_url: None,
            robots: Some("index, follow".to_owned()),
            twitter: TwitterDefaults::default(),
        }
    }
}

/// Twitter card defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterDefaults {
    pub creator: Option<String>,
}

impl Default for TwitterDefaults {
    fn default() -> Self {
        Self {
            creator: Some("@a_barghigiani".to_owned()),
        }
    }
}

/// Content source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the content collections, relative to the root
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src/content"),
        }
    }
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: "127.0.0.1".to_owned(),
            port: 5277,
        }
    }
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.root = root.clone();
        }
        self.config_path = self.root.join(&cli.config);

        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = interface.clone();
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    /// Site base URL, falling back to [`DEFAULT_BASE_URL`] when unset
    pub fn site_url(&self) -> &str {
        self.base.url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Absolute path of the content collections directory
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content.root)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }
        Ok(())
    }
}
