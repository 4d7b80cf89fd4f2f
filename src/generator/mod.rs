//! Generator module - writes the static site to the public directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{post_path, static_params, ContentStore, Lookup};
use crate::helpers::{date_xml, escape_xml, full_url_for, strip_invalid_xml_chars};
use crate::render::{PageRenderer, STYLESHEET_PATH};
use crate::theme::{generate_stylesheet, theme};
use crate::Portfolio;

/// Static site generator
pub struct Generator {
    site: Portfolio,
    renderer: PageRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Portfolio) -> Result<Self> {
        let renderer = PageRenderer::new(site)?;
        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, store: &ContentStore) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;
        self.remove_stale_posts()?;

        // Static assets first so generated files win on conflicts
        self.copy_static_assets()?;

        self.generate_stylesheet()?;
        self.generate_home_page(store)?;
        self.generate_blog_index(store)?;
        self.generate_post_pages(store)?;
        self.generate_not_found_page()?;

        if self.site.config.feed.enable {
            self.generate_atom_feed(store)?;
        }

        Ok(())
    }

    /// Drop post pages from earlier runs; only the current published set is written back
    fn remove_stale_posts(&self) -> Result<()> {
        let blog_dir = self.site.public_dir.join("blog");
        if blog_dir.exists() {
            fs::remove_dir_all(&blog_dir)
                .with_context(|| format!("Failed to remove {:?}", blog_dir))?;
            tracing::debug!("Removed previous output {:?}", blog_dir);
        }
        Ok(())
    }

    fn generate_stylesheet(&self) -> Result<()> {
        let css = generate_stylesheet(theme());
        self.write_output(STYLESHEET_PATH, &css)?;
        tracing::debug!("Generated {}", STYLESHEET_PATH);
        Ok(())
    }

    fn generate_home_page(&self, store: &ContentStore) -> Result<()> {
        let html = self.renderer.render_home(store.all_posts())?;
        self.write_output("index.html", &html)
    }

    fn generate_blog_index(&self, store: &ContentStore) -> Result<()> {
        let html = self.renderer.render_blog_index(store.all_posts())?;
        self.write_output("blog/index.html", &html)
    }

    /// Generate one page per published post
    fn generate_post_pages(&self, store: &ContentStore) -> Result<()> {
        let posts = store.all_posts();
        let slugs = static_params(posts);

        for slug in &slugs {
            let html = match self.renderer.render_post(posts, slug)? {
                Lookup::Found(html) => html,
                Lookup::NotFound => {
                    anyhow::bail!("Static route {:?} has no matching post", slug)
                }
            };
            let output = format!("{}index.html", post_path(slug));
            self.write_output(&output, &html)?;
            tracing::debug!("Generated post: {}", output);
        }

        tracing::info!("Generated {} post pages", slugs.len());
        Ok(())
    }

    fn generate_not_found_page(&self) -> Result<()> {
        let html = self.renderer.render_not_found()?;
        self.write_output("404.html", &html)
    }

    fn generate_atom_feed(&self, store: &ContentStore) -> Result<()> {
        let config = &self.site.config;
        let feed = atom_feed(config, store);
        self.write_output(&config.feed.path, &feed)?;
        tracing::info!("Generated {}", config.feed.path);

        Ok(())
    }

    /// Copy static assets (images, fonts, etc.) to public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static assets", copied);
        Ok(())
    }

    /// Write `content` to a path relative to the public directory
    fn write_output(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(Path::new(relative.trim_start_matches('/')));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }
}

/// Atom feed of the newest published posts
pub fn atom_feed(config: &SiteConfig, store: &ContentStore) -> String {
    let posts: Vec<_> = store
        .published()
        .take(config.feed.limit)
        .collect();

    let updated = posts
        .first()
        .map(|p| date_xml(&p.date))
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!(
        "  <subtitle>{}</subtitle>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        full_url_for(config, &config.feed.path)
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", full_url_for(config, "/")));
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));
    feed.push_str(&format!("  <id>{}</id>\n", full_url_for(config, "/")));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        escape_xml(&config.author)
    ));

    for post in posts {
        let url = full_url_for(config, &post.path());
        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
        feed.push_str(&format!("    <id>{}</id>\n", url));
        feed.push_str(&format!("    <published>{}</published>\n", date_xml(&post.date)));
        feed.push_str(&format!("    <updated>{}</updated>\n", date_xml(&post.date)));
        feed.push_str(&format!(
            "    <summary>{}</summary>\n",
            escape_xml(&strip_invalid_xml_chars(&post.description))
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use tempfile::TempDir;

    fn site(dir: &TempDir, mode: Mode) -> Portfolio {
        let site =
            Portfolio::with_config(dir.path().to_path_buf(), SiteConfig::default(), mode);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndescription: d\ndate: 2024-03-03\nisPublished: true\n---\n<p>hi</p>\n",
        )
        .unwrap();
        fs::write(
            site.posts_dir.join("draft.md"),
            "---\ntitle: Draft\ndate: 2024-03-04\n---\nNot yet.\n",
        )
        .unwrap();
        site
    }

    #[test]
    fn test_generates_only_published_post_routes() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Development);
        let store = site.load_content().unwrap();

        Generator::new(&site).unwrap().generate(&store).unwrap();

        let public = &site.public_dir;
        assert!(public.join("blog/hello/index.html").exists());
        assert!(!public.join("blog/draft").exists());
        assert!(public.join("index.html").exists());
        assert!(public.join("blog/index.html").exists());
        assert!(public.join("404.html").exists());
        assert!(public.join("css/theme.css").exists());
    }

    #[test]
    fn test_unpublished_post_removed_on_regenerate() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let page = site.public_dir.join("blog/hello/index.html");

        let store = site.load_content().unwrap();
        Generator::new(&site).unwrap().generate(&store).unwrap();
        assert!(page.exists());

        fs::write(
            site.posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndescription: d\ndate: 2024-03-03\nisPublished: false\n---\n<p>hi</p>\n",
        )
        .unwrap();
        let store = site.load_content().unwrap();
        assert!(static_params(store.all_posts()).is_empty());

        Generator::new(&site).unwrap().generate(&store).unwrap();
        assert!(!page.exists());
        assert!(site.public_dir.join("blog/index.html").exists());
    }

    #[test]
    fn test_post_page_content() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let store = site.load_content().unwrap();

        Generator::new(&site).unwrap().generate(&store).unwrap();

        let html = fs::read_to_string(site.public_dir.join("blog/hello/index.html")).unwrap();
        assert!(html.contains("Posted on March 3rd, 2024"));
        assert!(html.contains("/images/og-template.png"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn test_feed_lists_published_posts() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let store = site.load_content().unwrap();

        Generator::new(&site).unwrap().generate(&store).unwrap();

        let feed = fs::read_to_string(site.public_dir.join("atom.xml")).unwrap();
        assert!(feed.contains("<title>Hello</title>"));
        assert!(feed.contains("http://localhost:4000/blog/hello/"));
        assert!(!feed.contains("Draft"));
    }

    #[test]
    fn test_static_assets_copied() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        fs::create_dir_all(site.static_dir.join("images")).unwrap();
        fs::write(site.static_dir.join("images/og-template.png"), b"png").unwrap();
        let store = site.load_content().unwrap();

        Generator::new(&site).unwrap().generate(&store).unwrap();

        assert_eq!(
            fs::read(site.public_dir.join("images/og-template.png")).unwrap(),
            b"png"
        );
    }
}
