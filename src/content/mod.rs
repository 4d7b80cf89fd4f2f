//! Content module - posts, their lookup, and rich-content rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod store;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::{ContentRenderer, MarkdownRenderer};
pub use post::{post_path, Post};
pub use store::{
    filter_published_posts, get_post_by_slug, static_params, ContentError, ContentStore, Lookup,
};
