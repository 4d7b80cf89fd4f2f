//! List site content

use anyhow::Result;

use crate::content::{post_path, static_params};
use crate::helpers::format_date;
use crate::projects::projects;
use crate::render::STYLESHEET_PATH;
use crate::Portfolio;

/// List site content by type
pub fn run(site: &Portfolio, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let store = site.load_content()?;
            println!("Posts ({}):", store.len());
            for post in store.all_posts() {
                let status = if post.is_published { "" } else { " (unpublished)" };
                println!(
                    "  {} - {} [{}]{}",
                    format_date(&post.date, "YYYY-MM-DD"),
                    post.title,
                    post.slug,
                    status
                );
            }
        }
        "project" | "projects" => {
            let projects = projects();
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!("  {} - {} ({})", project.title, project.link, project.stack);
            }
        }
        "route" | "routes" => {
            let routes = routes(site)?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, projects, routes",
                content_type
            );
        }
    }

    Ok(())
}

/// Every path the generator writes a page for
pub fn routes(site: &Portfolio) -> Result<Vec<String>> {
    let store = site.load_content()?;

    let mut routes = vec!["/".to_string(), "/blog/".to_string()];
    routes.extend(
        static_params(store.all_posts())
            .iter()
            .map(|slug| format!("/{}", post_path(slug))),
    );
    routes.push(format!("/{}", STYLESHEET_PATH));
    if site.config.feed.enable {
        routes.push(format!("/{}", site.config.feed.path.trim_start_matches('/')));
    }
    routes.push("/404.html".to_string());

    Ok(routes)
}
