//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone used to interpret naive post dates (empty means UTC)
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    /// Header and social image used when a post has no thumbnail
    pub default_thumbnail: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub feed: FeedConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Abdullah Zeidan".to_string(),
            description: "Software developer. Portfolio and blog.".to_string(),
            author: "Abdullah Zeidan".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            default_thumbnail: "/images/og-template.png".to_string(),
            highlight: HighlightConfig::default(),

            seo: SeoConfig::default(),
            home: HomeConfig::default(),
            feed: FeedConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.timezone()?;
        Ok(config)
    }

    /// Resolve the configured timezone
    pub fn timezone(&self) -> Result<Tz> {
        let name = self.timezone.trim();
        if name.is_empty() {
            return Ok(Tz::UTC);
        }
        name.parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone {:?}: {}", name, e))
    }

    /// Site title used when a page has no title of its own
    pub fn default_title(&self) -> &str {
        self.seo.default_title.as_deref().unwrap_or(&self.title)
    }
}

/// Site-wide default metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// `%s` is replaced with the page title
    pub title_template: String,
    pub default_title: Option<String>,
    pub site_name: Option<String>,
    pub locale: String,
    /// Social preview image (path or absolute URL)
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub twitter_handle: Option<String>,
    pub twitter_card: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_template: "%s | Abdullah Zeidan".to_string(),
            default_title: None,
            site_name: None,
            locale: "en_US".to_string(),
            image: "/images/og-template.png".to_string(),
            image_width: 1200,
            image_height: 630,
            twitter_handle: None,
            twitter_card: "summary_large_image".to_string(),
        }
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub recent_posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { recent_posts: 3 }
    }
}

/// Atom feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub path: String,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "atom.xml".to_string(),
            limit: 20,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
