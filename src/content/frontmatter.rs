//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "thumbnailUrl", alias = "thumbnail_url", alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    /// Posts are drafts unless explicitly published
    #[serde(rename = "isPublished", alias = "is_published", alias = "published")]
    pub is_published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading horizontal rule followed by prose is not front-matter
        if !looks_like_yaml(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        if content.starts_with('{') {
            let mut depth = 0;
            let mut end_pos = 0;
            for (i, c) in content.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end_pos = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if end_pos > 0 {
                let json_content = &content[..end_pos];
                let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        Err(anyhow!("Invalid JSON front-matter"))
    }
}

/// Whether a block between `---` fences has at least one `key: value` line
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in the formats posts use.
///
/// Naive values are interpreted in `tz`; values with an explicit offset keep
/// their instant and are converted to `tz`.
pub fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&tz));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let naive = d.and_hms_opt(0, 0, 0)?;
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello
description: d
date: 2024-03-03
thumbnailUrl: /images/hello.png
isPublished: true
---

<p>hi</p>
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.description.as_deref(), Some("d"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-03"));
        assert_eq!(fm.thumbnail_url.as_deref(), Some("/images/hello.png"));
        assert!(fm.is_published);
        assert_eq!(remaining.trim(), "<p>hi</p>");
    }

    #[test]
    fn test_field_aliases() {
        let content = "---\ntitle: Aliased\nthumbnail: /a.png\npublished: true\nseries: intro\n---\nBody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.thumbnail_url.as_deref(), Some("/a.png"));
        assert!(fm.is_published);
        assert_eq!(
            fm.extra.get("series").and_then(|v| v.as_str()),
            Some("intro")
        );
    }

    #[test]
    fn test_unpublished_by_default() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Draft\n---\nBody").unwrap();
        assert!(!fm.is_published);
        assert_eq!(fm.thumbnail_url, None);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "isPublished": true}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert!(fm.is_published);
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_string("2024-03-03", Tz::UTC).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 3));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_date_in_site_timezone() {
        let tz = chrono_tz::America::New_York;
        let dt = parse_date_string("2024/03/03 23:30", tz).unwrap();
        assert_eq!(dt.day(), 3);
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.timezone(), tz);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_site_timezone() {
        let dt = parse_date_string("2024-03-03T02:00:00Z", chrono_tz::America::New_York).unwrap();
        // 02:00 UTC is still March 2nd in New York
        assert_eq!(dt.day(), 2);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date_string("third of March", Tz::UTC).is_none());
    }
}
