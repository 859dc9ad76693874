//! Page helpers: reading progress, scroll-to-top visibility and the
//! "On This Page" outline for chapter pages.

use serde::{Deserialize, Serialize};

/// Scroll offset past which the scroll-to-top control shows
pub const SCROLL_TOP_THRESHOLD: f64 = 400.0;

/// Minimum number of headings before an outline is worth showing
pub const MIN_TOC_HEADINGS: usize = 3;

/// Percent of the page scrolled (0-100)
pub fn reading_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let height = scroll_height - client_height;
    if height <= 0.0 {
        return 0.0;
    }
    (scroll_top / height * 100.0).clamp(0.0, 100.0)
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
}

/// Heading found in the main content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id, generated as `heading-<index>` when the heading had none
    pub id: String,
    pub text: String,
    /// h3 entries are indented under the preceding h2
    pub sub: bool,
}

impl TocEntry {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Strip a leading markdown marker ("## ") left in heading text
fn clean_heading_text(text: &str) -> &str {
    let stripped = text.trim_start_matches('#');
    if stripped.len() < text.len() {
        if let Some(rest) = stripped.strip_prefix(' ') {
            return rest;
        }
    }
    text
}

/// Outline for a chapter page. `None` on the homepage or when there are
/// fewer than three headings.
pub fn build_toc(headings: &[Heading], is_homepage: bool) -> Option<Vec<TocEntry>> {
    if headings.len() < MIN_TOC_HEADINGS || is_homepage {
        return None;
    }

    let entries = headings
        .iter()
        .enumerate()
        .map(|(i, h)| TocEntry {
            id: h
                .id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("heading-{}", i)),
            text: clean_heading_text(&h.text).to_string(),
            sub: h.level == HeadingLevel::H3,
        })
        .collect();
    Some(entries)
}

/// Parse a plain-text outline, one heading per line: `h2 Title`,
/// `h3 Title` or `h2#anchor Title`. Blank lines and other tags are skipped.
pub fn parse_outline(text: &str) -> Vec<Heading> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let (tag, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let (tag, id) = match tag.split_once('#') {
                Some((tag, id)) => (tag, Some(id.to_string())),
                None => (tag, None),
            };
            let level = match tag.to_ascii_lowercase().as_str() {
                "h2" => HeadingLevel::H2,
                "h3" => HeadingLevel::H3,
                _ => return None,
            };
            Some(Heading {
                level,
                id,
                text: rest.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(level: HeadingLevel, id: Option<&str>, text: &str) -> Heading {
        Heading {
            level,
            id: id.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_reading_progress() {
        assert_eq!(reading_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(reading_progress(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(reading_progress(1000.0, 2000.0, 1000.0), 100.0);
        // Page shorter than the viewport
        assert_eq!(reading_progress(0.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn test_scroll_top_visibility() {
        assert!(!scroll_top_visible(400.0));
        assert!(scroll_top_visible(401.0));
    }

    #[test]
    fn test_toc_needs_three_headings() {
        let headings = vec![
            h(HeadingLevel::H2, None, "Intro"),
            h(HeadingLevel::H2, None, "Setup"),
        ];
        assert!(build_toc(&headings, false).is_none());
    }

    #[test]
    fn test_toc_skipped_on_homepage() {
        let headings = vec![
            h(HeadingLevel::H2, None, "A"),
            h(HeadingLevel::H2, None, "B"),
            h(HeadingLevel::H3, None, "C"),
        ];
        assert!(build_toc(&headings, true).is_none());
    }

    #[test]
    fn test_toc_entries() {
        let headings = vec![
            h(HeadingLevel::H2, Some("intro"), "## Intro"),
            h(HeadingLevel::H3, None, "Details"),
            h(HeadingLevel::H2, Some(""), "#Hashtag"),
        ];
        let toc = build_toc(&headings, false).unwrap();
        assert_eq!(toc[0].id, "intro");
        assert_eq!(toc[0].text, "Intro");
        assert!(!toc[0].sub);
        assert_eq!(toc[1].id, "heading-1");
        assert_eq!(toc[1].href(), "#heading-1");
        assert!(toc[1].sub);
        assert_eq!(toc[2].id, "heading-2");
        assert_eq!(toc[2].text, "#Hashtag");
    }

    #[test]
    fn test_parse_outline() {
        let headings = parse_outline("h2 Getting Started\n\nh3#xaml XAML basics\np ignored\nH2 Wrap up");
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[1].level, HeadingLevel::H3);
        assert_eq!(headings[1].id.as_deref(), Some("xaml"));
        assert_eq!(headings[1].text, "XAML basics");
        assert_eq!(headings[2].level, HeadingLevel::H2);
    }
}
