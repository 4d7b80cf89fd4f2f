//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::Portfolio;

/// Generate the static site
pub fn run(site: &Portfolio) -> Result<()> {
    let start = std::time::Instant::now();

    let store = site.load_content()?;
    let generator = Generator::new(site)?;
    generator.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} site in {:.2}s",
        site.mode,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Portfolio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.posts_dir.exists() {
        watcher.watch(&site.posts_dir, notify::RecursiveMode::Recursive)?;
    }

    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(site) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Re-read the configuration and regenerate
fn rebuild(site: &Portfolio) -> Result<()> {
    let fresh = Portfolio::new(&site.base_dir, site.mode)?;
    run(&fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_generates_site() {
        let dir = TempDir::new().unwrap();
        let site = Portfolio::new(dir.path(), Mode::Production).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-03-03\nisPublished: true\n---\nHi\n",
        )
        .unwrap();

        run(&site).unwrap();

        assert!(site.public_dir.join("blog/hello/index.html").exists());
    }

    #[test]
    fn test_run_fails_on_duplicate_slug() {
        let dir = TempDir::new().unwrap();
        let site = Portfolio::new(dir.path(), Mode::Production).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        for name in ["a.md", "b.md"] {
            fs::write(
                site.posts_dir.join(name),
                "---\ntitle: Same\nslug: same\ndate: 2024-03-03\n---\n",
            )
            .unwrap();
        }

        assert!(run(&site).is_err());
        assert!(!site.public_dir.join("blog/same").exists());
    }
}
