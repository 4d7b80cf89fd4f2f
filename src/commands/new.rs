//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_slug;
use crate::Portfolio;

/// Create a new, unpublished post and return its path
pub fn create_post(site: &Portfolio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) if is_valid_slug(s) => s.to_string(),
        Some(s) => anyhow::bail!(
            "Invalid slug {:?}: use lowercase letters, digits and single hyphens",
            s
        ),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)?;
    let file_path = site.posts_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let tz = site.config.timezone()?;
    let now = chrono::Utc::now().with_timezone(&tz);

    let content = format!(
        "---\ntitle: {}\ndescription: ''\ndate: {}\nslug: {}\nisPublished: false\n---\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S"),
        slug
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar so titles containing `:` or `#` stay valid YAML
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
