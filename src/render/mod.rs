//! Page renderer - turns posts, projects and theme into HTML documents

mod metadata;

pub use metadata::{Metadata, OpenGraph, OpenGraphImage, TwitterCard};

use anyhow::Result;
use chrono::Datelike;
use tera::Context;

use crate::config::{Mode, SiteConfig};
use crate::content::{
    filter_published_posts, get_post_by_slug, ContentRenderer, Lookup, MarkdownRenderer, Post,
};
use crate::helpers::{date_xml, full_url_for, long_date, meta_generator, url_for};
use crate::projects::projects;
use crate::templates::{ConfigData, PostHeader, PostSummary, ProjectCardData, TemplateRenderer};
use crate::Portfolio;

/// Output path of the generated stylesheet
pub const STYLESHEET_PATH: &str = "css/theme.css";

/// Renders every page of the site
pub struct PageRenderer {
    config: SiteConfig,
    mode: Mode,
    templates: TemplateRenderer,
    content_renderer: Box<dyn ContentRenderer>,
    defaults: Metadata,
}

impl PageRenderer {
    /// Create a renderer using markdown for post bodies
    pub fn new(site: &Portfolio) -> Result<Self> {
        let markdown = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );
        Self::with_content_renderer(site.config.clone(), site.mode, Box::new(markdown))
    }

    /// Create a renderer with a custom post body renderer
    pub fn with_content_renderer(
        config: SiteConfig,
        mode: Mode,
        content_renderer: Box<dyn ContentRenderer>,
    ) -> Result<Self> {
        let templates = TemplateRenderer::new()?;
        let defaults = Metadata::site_defaults(&config);
        Ok(Self {
            config,
            mode,
            templates,
            content_renderer,
            defaults,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Metadata for the post page at `slug`
    pub fn generate_metadata(&self, posts: &[Post], slug: &str) -> Lookup<Metadata> {
        get_post_by_slug(posts, slug).map(|post| self.defaults.for_post(&self.config, post))
    }

    /// Hero header of a post page
    pub fn post_header(&self, post: &Post) -> PostHeader {
        PostHeader {
            title: post.title.clone(),
            image_src: url_for(&self.config, post.thumbnail_or(&self.config.default_thumbnail)),
            date_iso: date_xml(&post.date),
            date_display: long_date(&post.date),
        }
    }

    /// Whether the unpublished-post banner goes above the article
    pub fn show_unpublished_banner(&self, post: &Post) -> bool {
        self.mode.is_development() && !post.is_published
    }

    /// Render the post page at `slug`
    pub fn render_post(&self, posts: &[Post], slug: &str) -> Result<Lookup<String>> {
        let post = match get_post_by_slug(posts, slug) {
            Lookup::Found(post) => post,
            Lookup::NotFound => {
                tracing::debug!("No post with slug {:?}", slug);
                return Ok(Lookup::NotFound);
            }
        };

        let meta = self.defaults.for_post(&self.config, post);
        let article_html = self.content_renderer.render(&post.content)?;

        let mut context = self.base_context(&meta);
        context.insert("header", &self.post_header(post));
        context.insert("show_unpublished_banner", &self.show_unpublished_banner(post));
        context.insert("article_html", &article_html);

        let html = self.templates.render("post.html", &context)?;
        Ok(Lookup::Found(html))
    }

    /// Render the home page: intro, project cards and recent posts
    pub fn render_home(&self, posts: &[Post]) -> Result<String> {
        let recent: Vec<PostSummary> = posts
            .iter()
            .filter(|p| filter_published_posts(p))
            .take(self.config.home.recent_posts)
            .map(|p| self.summary(p))
            .collect();

        let cards: Vec<ProjectCardData> = projects()
            .iter()
            .map(|card| ProjectCardData {
                card: *card,
                image_src: url_for(&self.config, card.image.src),
            })
            .collect();

        let meta = self.defaults.clone();
        let mut context = self.base_context(&meta);
        context.insert("projects", &cards);
        context.insert("posts", &recent);

        self.templates.render("home.html", &context)
    }

    /// Render the list of every published post
    pub fn render_blog_index(&self, posts: &[Post]) -> Result<String> {
        let summaries: Vec<PostSummary> = posts
            .iter()
            .filter(|p| filter_published_posts(p))
            .map(|p| self.summary(p))
            .collect();

        let meta = self.defaults.with_page(
            "Blog",
            &format!("Posts by {}", self.config.author),
            Some(full_url_for(&self.config, "blog/")),
        );
        let mut context = self.base_context(&meta);
        context.insert("posts", &summaries);

        self.templates.render("blog_index.html", &context)
    }

    /// Render the page served for unknown routes
    pub fn render_not_found(&self) -> Result<String> {
        let mut meta = self
            .defaults
            .with_page("Not found", "This page could not be found.", None);
        meta.canonical_url = None;
        let context = self.base_context(&meta);
        self.templates.render("not_found.html", &context)
    }

    fn summary(&self, post: &Post) -> PostSummary {
        PostSummary {
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            url: url_for(&self.config, &post.path()),
            date_iso: date_xml(&post.date),
            date_display: long_date(&post.date),
        }
    }

    fn base_context(&self, meta: &Metadata) -> Context {
        let config = &self.config;
        let config_data = ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, "/"),
            stylesheet_url: url_for(config, STYLESHEET_PATH),
            feed_url: config
                .feed
                .enable
                .then(|| url_for(config, &config.feed.path)),
            generator: meta_generator(),
            github_profile_url: crate::projects::GITHUB_PROFILE_URL.to_string(),
            current_year: chrono::Utc::now().year(),
        };

        let mut context = Context::new();
        context.insert("config", &config_data);
        context.insert("meta", meta);
        context.insert("document_title", &meta.document_title());
        context
    }
}
