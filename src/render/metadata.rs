//! Page metadata (document title, description, social preview)

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::full_url_for;

/// Everything a page puts in its `<head>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    /// `%s` is replaced with `title` to form the document title
    pub title_template: String,
    pub description: String,
    pub canonical_url: Option<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

/// Open Graph fields read by link-unfurling clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub locale: String,
    /// `og:type`
    pub kind: String,
    pub url: Option<String>,
    pub images: Vec<OpenGraphImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub site: Option<String>,
}

impl Metadata {
    /// Site-wide defaults every page starts from
    pub fn site_defaults(config: &SiteConfig) -> Self {
        let title = config.default_title().to_string();
        let site_name = config
            .seo
            .site_name
            .clone()
            .unwrap_or_else(|| config.title.clone());

        Self {
            title: title.clone(),
            title_template: config.seo.title_template.clone(),
            description: config.description.clone(),
            canonical_url: Some(full_url_for(config, "/")),
            open_graph: OpenGraph {
                title,
                description: config.description.clone(),
                site_name: site_name.clone(),
                locale: config.seo.locale.clone(),
                kind: "website".to_string(),
                url: Some(full_url_for(config, "/")),
                images: vec![OpenGraphImage {
                    url: full_url_for(config, &config.seo.image),
                    width: config.seo.image_width,
                    height: config.seo.image_height,
                    alt: site_name,
                }],
            },
            twitter: TwitterCard {
                card: config.seo.twitter_card.clone(),
                site: config.seo.twitter_handle.clone(),
            },
        }
    }

    /// Defaults with the title and description of one page
    pub fn with_page(&self, title: &str, description: &str, url: Option<String>) -> Self {
        let mut meta = self.clone();
        meta.title = title.to_string();
        meta.description = description.to_string();
        meta.open_graph.title = title.to_string();
        meta.open_graph.description = description.to_string();
        if url.is_some() {
            meta.canonical_url = url.clone();
            meta.open_graph.url = url;
        }
        meta
    }

    /// Metadata for a blog post page
    pub fn for_post(&self, config: &SiteConfig, post: &Post) -> Self {
        let mut meta = self.with_page(
            &post.title,
            &post.description,
            Some(full_url_for(config, &post.path())),
        );
        meta.open_graph.kind = "article".to_string();
        meta
    }

    /// Title shown in the browser tab
    pub fn document_title(&self) -> String {
        if self.title_template.contains("%s") {
            self.title_template.replace("%s", &self.title)
        } else {
            self.title.clone()
        }
    }
}
