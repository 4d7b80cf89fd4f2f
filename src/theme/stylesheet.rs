//! Stylesheet generated from the theme constants

use std::fmt::Write;

use super::{ColorValue, Theme};

/// Page styles. Media queries are appended per breakpoint.
const BASE_RULES: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
html { color-scheme: light dark; }
body {
  margin: 0;
  font-family: var(--font-sans);
  background: var(--color-light);
  color: var(--color-dark);
  line-height: 1.6;
}
@media (prefers-color-scheme: dark) {
  body { background: var(--color-dark); color: var(--color-light); }
}
a { color: var(--color-brand-600); }
.container { width: 100%; margin-inline: auto; padding-inline: 1rem; }
.max-w-3xl { max-width: 48rem; }
.site-nav { display: flex; gap: 1.5rem; padding-block: 1rem; font-family: var(--font-mono); }
.site-nav a { text-decoration: none; }
.site-footer { padding-block: 2rem; font-size: 0.875rem; opacity: 0.7; }

.post-hero {
  position: relative;
  isolation: isolate;
  display: flex;
  flex-direction: column;
  justify-content: flex-end;
  width: 100%;
  aspect-ratio: 2 / 1;
  max-height: 20rem;
  border-bottom: 1px solid rgb(115 115 115 / 0.2);
}
.post-hero__image {
  position: absolute;
  inset: 0;
  z-index: -20;
  width: 100%;
  height: 100%;
  object-fit: cover;
  user-select: none;
  background: #a3a3a3;
}
.post-hero__gradient {
  position: absolute;
  inset: 0;
  z-index: -10;
  background: linear-gradient(to bottom, rgb(0 0 0 / 0.1), rgb(0 0 0 / 0.9));
}
.post-hero__title {
  margin: 0 0 1rem;
  font-family: var(--font-mono);
  font-size: 2.25rem;
  font-weight: 800;
  letter-spacing: -0.05em;
  text-wrap: balance;
  color: var(--color-light);
}
.post-hero__date { display: block; margin-bottom: 1rem; font-size: 0.875rem; color: #a3a3a3; }
.blinking-cursor { animation: blink 1s step-end infinite; }
@keyframes blink { 50% { opacity: 0; } }

.alert-unpublished {
  margin-bottom: 2rem;
  padding: 1rem;
  border: 1px solid #f59e0b;
  border-radius: 0.5rem;
  background: rgb(245 158 11 / 0.1);
}
.prose { max-width: none; }
.prose p { line-height: 1.7; }
.prose h1, .prose h2, .prose h3, .prose h4 { font-weight: 600; }
.prose a { color: var(--color-brand-500); }

.project-cards { display: grid; gap: 1.5rem; }
.project-card {
  display: flex;
  gap: 1rem;
  padding: 1rem;
  border: 1px solid rgb(115 115 115 / 0.2);
  border-radius: 0.5rem;
  text-decoration: none;
  color: inherit;
  transition: opacity 150ms;
}
.project-cards:hover .project-card:not(:hover) { opacity: 0.6; }
.project-card__image { width: 4rem; height: 4rem; flex-shrink: 0; border-radius: 0.375rem; object-fit: contain; }
.project-card__title { margin: 0; font-family: var(--font-mono); color: var(--color-brand-600); }
.project-card__stack { font-size: 0.875rem; opacity: 0.7; }

.post-list { list-style: none; padding: 0; }
.post-list__item { padding-block: 1rem; border-bottom: 1px solid rgb(115 115 115 / 0.2); }
.post-list__date { font-size: 0.875rem; color: #a3a3a3; }
"#;

/// Render the theme as CSS custom properties followed by the page styles
pub fn generate_stylesheet(theme: &Theme) -> String {
    let mut css = String::from(":root {\n");

    for (name, width) in &theme.screens {
        let _ = writeln!(css, "  --screen-{}: {}px;", name, width);
    }

    for (name, value) in &theme.colors {
        match value {
            ColorValue::Solid(color) => {
                let _ = writeln!(css, "  --color-{}: {};", name, color);
            }
            ColorValue::Palette(shades) => {
                for (shade, color) in shades {
                    let _ = writeln!(css, "  --color-{}-{}: {};", name, shade, color);
                }
            }
        }
    }

    for (role, fonts) in &theme.font_families {
        let _ = writeln!(css, "  --font-{}: {};", role, font_stack(fonts));
    }

    css.push_str("}\n");
    css.push_str(BASE_RULES);

    // Custom media queries can't use variables, so breakpoints are inlined
    if let Some(sm) = theme.screen("sm") {
        let _ = writeln!(
            css,
            "@media (min-width: {}px) {{ .post-hero__title {{ font-size: 3rem; }} }}",
            sm
        );
    }
    if let Some(md) = theme.screen("md") {
        let _ = writeln!(
            css,
            "@media (min-width: {}px) {{ .container {{ padding-inline: 2rem; }} .post-hero__title {{ margin-bottom: 1.5rem; }} .post-hero__date {{ margin-bottom: 1.5rem; }} }}",
            md
        );
    }
    if let Some(lg) = theme.screen("lg") {
        let _ = writeln!(
            css,
            "@media (min-width: {}px) {{ .post-hero__title {{ font-size: 3.75rem; }} .prose {{ font-size: 1.125rem; }} .project-cards {{ grid-template-columns: repeat(2, minmax(0, 1fr)); }} }}",
            lg
        );
    }
    if let Some(xl) = theme.screen("xl") {
        let _ = writeln!(
            css,
            "@media (min-width: {}px) {{ .post-hero {{ max-height: 24rem; }} }}",
            xl
        );
    }

    css
}

/// Format a fallback list as a CSS `font-family` value
///
/// A leading `var(--x)` takes the rest of the list as its fallback, since an
/// undefined custom property would otherwise invalidate the whole declaration.
pub fn font_stack(fonts: &[&str]) -> String {
    let quoted: Vec<String> = fonts
        .iter()
        .map(|font| {
            if font.starts_with("var(") || !font.contains(' ') {
                font.to_string()
            } else {
                format!("\"{}\"", font)
            }
        })
        .collect();

    match quoted.split_first() {
        Some((first, rest)) if !rest.is_empty() && is_bare_var(first) => {
            format!("{}, {})", first.trim_end_matches(')'), rest.join(", "))
        }
        _ => quoted.join(", "),
    }
}

/// `var(--name)` without a fallback of its own
fn is_bare_var(value: &str) -> bool {
    value.starts_with("var(") && value.ends_with(')') && !value.contains(',')
}
