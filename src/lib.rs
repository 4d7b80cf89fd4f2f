//! portfolio-rs: static generator and dev server for a personal portfolio and blog
//!
//! Posts are loaded once from markdown files into an immutable content store,
//! looked up by slug, and rendered with embedded Tera templates. The project
//! cards and theme constants are compiled into the binary.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod projects;
pub mod render;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::{Mode, SiteConfig};
use content::ContentStore;

/// The portfolio site rooted at a directory
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: SiteConfig,
    /// Execution context the site is rendered for
    pub mode: Mode,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory containing post files
    pub posts_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Portfolio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P, mode: Mode) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config, mode))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: SiteConfig, mode: Mode) -> Self {
        let posts_dir = base_dir.join(&config.content_dir).join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            mode,
            base_dir,
            posts_dir,
            static_dir,
            public_dir,
        }
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Load every post into a fresh content store
    pub fn load_content(&self) -> Result<ContentStore> {
        ContentStore::load(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
