//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Abdullah Zeidan
description: Software engineer writing about the web
author: Abdullah Zeidan
language: en
timezone: ''

# URL
url: http://localhost:4000
root: /

# Directory
content_dir: content
posts_dir: posts
static_dir: static
public_dir: public

# Pages
default_thumbnail: /images/og-template.png
home:
  recent_posts: 3

# Metadata
seo:
  title_template: '%s | Abdullah Zeidan'
  locale: en_US
  image: /images/og-template.png
  twitter_card: summary_large_image

feed:
  enable: true
  path: atom.xml
  limit: 20

highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let now = chrono::Utc::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on this site
date: {}
isPublished: false
---

This post is unpublished: it renders at `/blog/hello-world/` but is left out
of the blog index and the generated site until `isPublished` is `true`.

## Writing

```bash
$ portfolio-rs new "My New Post"
```

## Previewing

```bash
$ portfolio-rs server --open
```
"#,
        now.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;
    tracing::info!("Initialized site in {:?}", target_dir);

    Ok(())
}
