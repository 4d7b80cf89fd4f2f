//! In-memory post collection and the lookups routes are built from

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use super::loader::ContentLoader;
use super::Post;
use crate::Portfolio;

/// Errors raised while turning content files into posts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Duplicate slug {slug:?} in {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid slug {slug:?} in {path:?}")]
    InvalidSlug { slug: String, path: PathBuf },

    #[error("Invalid date {value:?} in {path:?}")]
    InvalidDate { value: String, path: PathBuf },

    #[error("Failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of looking something up by route parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Immutable collection of every post, newest first
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
}

impl ContentStore {
    /// Load all posts of a site
    pub fn load(site: &Portfolio) -> Result<Self> {
        let posts = ContentLoader::new(site).load_posts()?;
        let store = Self::from_posts(posts)?;
        tracing::info!(
            "Loaded {} posts ({} published)",
            store.posts.len(),
            store.published().count()
        );
        Ok(store)
    }

    /// Build a store from already parsed posts.
    ///
    /// Posts are ordered by date descending, ties by slug ascending.
    pub fn from_posts(mut posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<&str, &Post> = HashMap::with_capacity(posts.len());
        for post in &posts {
            if let Some(first) = seen.insert(&post.slug, post) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.source.clone(),
                    second: post.source.clone(),
                });
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(Self { posts })
    }

    /// Every post, published or not
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    /// Published posts in store order
    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| filter_published_posts(p))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Whether a post belongs in public listings and generated routes
pub fn filter_published_posts(post: &Post) -> bool {
    post.is_published
}

/// Find the post whose slug equals `slug` exactly
pub fn get_post_by_slug<'a>(posts: &'a [Post], slug: &str) -> Lookup<&'a Post> {
    posts.iter().find(|p| p.slug == slug).into()
}

/// Slugs of the post pages that are generated ahead of time
pub fn static_params(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter(|p| filter_published_posts(p))
        .map(|p| p.slug.clone())
        .collect()
}
