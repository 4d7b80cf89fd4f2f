//! Theme constants
//!
//! Breakpoints, colors and font stacks shared by every page. Values are fixed
//! at compile time; changing one means rebuilding the site.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;

/// A named color: either a single value or a palette of shades
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Solid(&'static str),
    Palette(IndexMap<&'static str, &'static str>),
}

/// Read-only styling constants
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    /// Breakpoint name -> min width in pixels
    pub screens: IndexMap<&'static str, u32>,
    /// Color name -> value or palette
    pub colors: IndexMap<&'static str, ColorValue>,
    /// Font role -> ordered fallback list
    pub font_families: IndexMap<&'static str, Vec<&'static str>>,
}

const BRAND_TEAL: [(&str, &str); 11] = [
    ("50", "#f0fdfa"),
    ("100", "#ccfbf1"),
    ("200", "#99f6e4"),
    ("300", "#5eead4"),
    ("400", "#2dd4bf"),
    ("500", "#14b8a6"),
    ("600", "#0d9488"),
    ("700", "#0f766e"),
    ("800", "#115e59"),
    ("900", "#134e4a"),
    ("950", "#042f2e"),
];

/// Default sans-serif stack the site font falls back to
const SANS_FALLBACK: [&str; 7] = [
    "ui-sans-serif",
    "system-ui",
    "sans-serif",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Segoe UI Symbol",
    "Noto Color Emoji",
];

lazy_static! {
    static ref THEME: Theme = Theme::build();
}

/// The process-wide theme
pub fn theme() -> &'static Theme {
    &THEME
}

impl Theme {
    fn build() -> Self {
        let screens = IndexMap::from([
            ("sm", 640),
            ("md", 768),
            ("lg", 1024),
            ("xl", 1280),
            ("2xl", 1536),
        ]);

        let colors = IndexMap::from([
            ("dark", ColorValue::Solid("hsl(0, 0%, 7%)")),
            ("light", ColorValue::Solid("hsl(0, 0%, 100%)")),
            ("brand", ColorValue::Palette(IndexMap::from(BRAND_TEAL))),
        ]);

        let mut sans = vec!["var(--font-grotesk)"];
        sans.extend(SANS_FALLBACK);

        let font_families = IndexMap::from([
            (
                "mono",
                vec!["var(--font-monospace)", "Lucida Console", "Monaco", "monospace"],
            ),
            ("sans", sans),
        ]);

        Self {
            screens,
            colors,
            font_families,
        }
    }

    /// Min width of a breakpoint in pixels
    pub fn screen(&self, name: &str) -> Option<u32> {
        self.screens.get(name).copied()
    }

    /// Look up a solid color, or a palette shade when `shade` is given
    pub fn color(&self, name: &str, shade: Option<&str>) -> Option<&'static str> {
        match (self.colors.get(name)?, shade) {
            (ColorValue::Solid(value), None) => Some(value),
            (ColorValue::Palette(shades), Some(shade)) => shades.get(shade).copied(),
            _ => None,
        }
    }

    pub fn fonts(&self, role: &str) -> Option<&[&'static str]> {
        self.font_families.get(role).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screens_in_ascending_order() {
        let widths: Vec<u32> = theme().screens.values().copied().collect();
        assert_eq!(widths, vec![640, 768, 1024, 1280, 1536]);
        assert_eq!(theme().screen("2xl"), Some(1536));
        assert_eq!(theme().screen("3xl"), None);
    }

    #[test]
    fn test_colors() {
        let theme = theme();
        assert_eq!(theme.color("dark", None), Some("hsl(0, 0%, 7%)"));
        assert_eq!(theme.color("brand", Some("500")), Some("#14b8a6"));
        assert_eq!(theme.color("brand", None), None);
        assert_eq!(theme.color("dark", Some("500")), None);
    }

    #[test]
    fn test_brand_palette_has_every_shade() {
        let Some(ColorValue::Palette(shades)) = theme().colors.get("brand") else {
            panic!("brand should be a palette");
        };
        let names: Vec<_> = shades.keys().copied().collect();
        assert_eq!(
            names,
            vec!["50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950"]
        );
    }

    #[test]
    fn test_font_stacks_start_with_css_variable() {
        let mono = theme().fonts("mono").unwrap();
        assert_eq!(mono.first(), Some(&"var(--font-monospace)"));
        assert_eq!(mono.last(), Some(&"monospace"));
        let sans = theme().fonts("sans").unwrap();
        assert_eq!(sans.first(), Some(&"var(--font-grotesk)"));
        assert!(sans.contains(&"system-ui"));
    }
}
