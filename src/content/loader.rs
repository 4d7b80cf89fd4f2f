//! Content loader - loads posts from the posts directory

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::parse_date_string;
use super::{ContentError, FrontMatter, Post};
use crate::Portfolio;

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Lowercase alphanumeric words joined by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Loads posts from `<content_dir>/<posts_dir>`
pub struct ContentLoader {
    posts_dir: PathBuf,
    timezone: Tz,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(site: &Portfolio) -> Self {
        let timezone = site.config.timezone().unwrap_or_else(|e| {
            tracing::warn!("{}, using UTC", e);
            Tz::UTC
        });
        Self {
            posts_dir: site.posts_dir.clone(),
            timezone,
        }
    }

    /// Load every post file. Order is unspecified; the store sorts.
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        if !self.posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Load {
                path: e.path().unwrap_or(&self.posts_dir).to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();
            if path.is_file() && is_post_file(path) {
                let post = self.load_post(path)?;
                tracing::debug!("Loaded post {:?} from {:?}", post.slug, path);
                posts.push(post);
            }
        }

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::Load {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        let slug = match fm.slug {
            Some(slug) if is_valid_slug(&slug) => slug,
            Some(slug) => {
                return Err(ContentError::InvalidSlug {
                    slug,
                    path: path.to_path_buf(),
                })
            }
            None => {
                let derived = slug::slugify(stem);
                if !is_valid_slug(&derived) {
                    return Err(ContentError::InvalidSlug {
                        slug: derived,
                        path: path.to_path_buf(),
                    });
                }
                derived
            }
        };

        let date = match fm.date {
            Some(value) => parse_date_string(&value, self.timezone).ok_or_else(|| {
                ContentError::InvalidDate {
                    value,
                    path: path.to_path_buf(),
                }
            })?,
            None => self.modified_date(path)?,
        };

        let title = fm.title.unwrap_or_else(|| stem.to_string());

        let mut post = Post::new(title, date);
        post.slug = slug;
        post.description = fm.description.unwrap_or_default();
        post.thumbnail_url = fm.thumbnail_url.filter(|t| !t.trim().is_empty());
        post.is_published = fm.is_published;
        post.content = body.to_string();
        post.source = path.to_path_buf();
        post.extra = fm.extra;

        Ok(post)
    }

    /// File modification time in the site timezone
    fn modified_date(&self, path: &Path) -> Result<DateTime<Tz>, ContentError> {
        let modified = fs::metadata(path)?.modified()?;
        Ok(DateTime::<chrono::Utc>::from(modified).with_timezone(&self.timezone))
    }
}

/// Check if a file holds a post
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "markdown" | "mdx"))
        .unwrap_or(false)
}
