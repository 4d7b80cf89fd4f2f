//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/theme.css") // -> "/portfolio/css/theme.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/hello/") // -> "https://example.com/blog/hello/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Whether `path` already carries a scheme or is protocol-relative
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/portfolio/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/theme.css"), "/portfolio/css/theme.css");
        assert_eq!(url_for(&config, "blog/"), "/portfolio/blog/");
        assert_eq!(url_for(&config, ""), "/portfolio/");
    }

    #[test]
    fn test_url_for_root() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/images/og-template.png"), "/images/og-template.png");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/hello/"),
            "https://example.com/portfolio/blog/hello/"
        );
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(url_for(&config, "//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    }
}
