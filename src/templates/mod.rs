//! Built-in site templates using the Tera template engine
//!
//! Every template is embedded in the binary, so a site directory only needs
//! content and static assets.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::html_escape;
use crate::projects::ProjectCard;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped explicitly with `| escape`; rendered article HTML and
        // URLs pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/head_meta.html",
                include_str!("site/partials/head_meta.html"),
            ),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/post_list.html",
                include_str!("site/partials/post_list.html"),
            ),
            (
                "partials/project_cards.html",
                include_str!("site/partials/project_cards.html"),
            ),
            (
                "partials/unpublished_alert.html",
                include_str!("site/partials/unpublished_alert.html"),
            ),
            (
                "partials/blinking_cursor.html",
                include_str!("site/partials/blinking_cursor.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("escape_url", escape_url_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Tera filter: escape a URL for an attribute value, leaving `/` readable
fn escape_url_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_url", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub stylesheet_url: String,
    pub feed_url: Option<String>,
    pub generator: String,
    pub github_profile_url: String,
    pub current_year: i32,
}

/// A post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub date_iso: String,
    pub date_display: String,
}

/// A project card with its image path resolved against the site root
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCardData {
    #[serde(flatten)]
    pub card: ProjectCard,
    pub image_src: String,
}

/// The hero header of a post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub title: String,
    pub image_src: String,
    pub date_iso: String,
    pub date_display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out = truncate_chars_filter(&tera::Value::from("Hello World"), &args).unwrap();
        assert_eq!(out, tera::Value::from("Hello…"));

        let out = truncate_chars_filter(&tera::Value::from("Hi"), &args).unwrap();
        assert_eq!(out, tera::Value::from("Hi"));
    }

    #[test]
    fn test_escape_url_filter() {
        let out = escape_url_filter(
            &tera::Value::from(r#"/images/a".png?x=1&y=2"#),
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(out, tera::Value::from("/images/a&quot;.png?x=1&amp;y=2"));
    }
}
