//! Post model

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL-safe identifier, unique across the store
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary used for listings and metadata
    pub description: String,

    /// Publication date in the site timezone
    pub date: DateTime<Tz>,

    /// Header and social image
    pub thumbnail_url: Option<String>,

    /// Whether the post is part of the public site
    pub is_published: bool,

    /// Raw markdown content (front-matter stripped)
    pub content: String,

    /// Source file the post was loaded from
    pub source: PathBuf,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Tz>) -> Self {
        let slug = slug::slugify(&title);
        Self {
            slug,
            title,
            description: String::new(),
            date,
            thumbnail_url: None,
            is_published: false,
            content: String::new(),
            source: PathBuf::new(),
            extra: HashMap::new(),
        }
    }

    /// Header image, falling back to the site default
    pub fn thumbnail_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.thumbnail_url.as_deref().unwrap_or(default)
    }

    /// Site-relative path of the post page
    pub fn path(&self) -> String {
        post_path(&self.slug)
    }
}

/// Site-relative path of the page for `slug`
pub fn post_path(slug: &str) -> String {
    format!("blog/{}/", slug)
}
