//! Site configuration management for `config.json`.
//!
//! # Fields
//!
//! | Field              | Purpose                                         |
//! |--------------------|-------------------------------------------------|
//! | `default_template` | Template used when a page names none            |
//! | `site_title`       | Fallback page title, feed title, index title    |
//! | `site_url`         | Base URL for absolute links in the feed         |
//! | `site_description` | Feed channel description                        |
//! | `post_order`       | How posts are ordered on the index and in feed  |
//!
//! # Example
//!
//! ```json
//! {
//!     "default_template": "base",
//!     "site_title": "My Blog",
//!     "site_url": "https://example.com/",
//!     "site_description": "A personal blog"
//! }
//! ```

pub mod defaults;
mod error;
mod paths;

pub use error::ConfigError;
pub use paths::SitePaths;

use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// Post Ordering
// ============================================================================

/// Comparison used to order posts by their `date` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrder {
    /// Plain string comparison, descending. Only chronological when every
    /// date shares one fixed-width ISO 8601 form.
    #[default]
    Lexicographic,
    /// Parsed calendar dates, newest first. Unparseable dates sort last.
    Chronological,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing config.json
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Template name used when a document's frontmatter names none.
    #[serde(default = "defaults::site::default_template")]
    #[educe(Default = defaults::site::default_template())]
    pub default_template: String,

    /// Site title, used as the fallback page title.
    #[serde(default = "defaults::site::site_title")]
    #[educe(Default = defaults::site::site_title())]
    pub site_title: String,

    /// Base URL for absolute links in the rss feed.
    #[serde(default = "defaults::site::site_url")]
    #[educe(Default = defaults::site::site_url())]
    pub site_url: String,

    /// Site description for the rss channel.
    #[serde(default = "defaults::site::site_description")]
    #[educe(Default = defaults::site::site_description())]
    pub site_description: String,

    /// Post ordering on the blog index and in the feed.
    #[serde(default)]
    pub post_order: PostOrder,
}

impl SiteConfig {
    /// Parse configuration from JSON string
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content).map_err(|err| ConfigError::Json(path.to_path_buf(), err))
    }

    /// Load configuration, writing the defaults to `path` first if absent.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_path(path);
        }

        let config = Self::default();
        config.write(path)?;
        Ok(config)
    }

    /// Write configuration as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::Json(path.to_path_buf(), err))?;
        fs::write(path, content).map_err(|err| ConfigError::Io(path.to_path_buf(), err))
    }

    /// Validate configuration before a build
    pub fn validate(&self) -> Result<()> {
        if self.default_template.trim().is_empty() {
            bail!(ConfigError::Validation(
                "`default_template` must not be empty".into()
            ));
        }

        if !self.site_url.starts_with("http") {
            bail!(ConfigError::Validation(
                "`site_url` must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
