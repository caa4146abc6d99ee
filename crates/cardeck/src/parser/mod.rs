pub mod frontmatter;
pub mod splitter;

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::deck::DeckMeta;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z0-9_-]+):\s*(.*)$").expect("valid regex"));
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)\s]+)\)").expect("valid regex"));

/// A deck file split into slides, before validation.
#[derive(Debug, Clone)]
pub struct ParsedDeck {
    pub meta: DeckMeta,
    pub slides: Vec<RawSlide>,
}

#[derive(Debug, Clone, Default)]
pub struct RawSlide {
    pub directives: Vec<Directive>,
    pub title: Option<String>,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub alt: String,
    pub path: String,
}

impl RawSlide {
    pub fn directive(&self, name: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}

pub fn parse(content: &str) -> Result<ParsedDeck> {
    let (meta, body) = frontmatter::extract(content)?;
    let slides = splitter::split(&body)
        .into_iter()
        .map(|raw| parse_slide(&raw))
        .collect();
    Ok(ParsedDeck { meta, slides })
}

/// Pull the title, image and directives out of one slide's markdown.
/// The first `# ` heading and the first image outside code fences win; everything
/// else is ignored.
fn parse_slide(raw: &str) -> RawSlide {
    let mut slide = RawSlide::default();
    let mut in_code_block = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }
        if let Some(caps) = DIRECTIVE_RE.captures(trimmed) {
            slide.directives.push(Directive {
                name: caps[1].to_string(),
                value: caps[2].trim().to_string(),
            });
        } else if let Some(title) = line.strip_prefix("# ") {
            if slide.title.is_none() {
                slide.title = Some(title.trim().to_string());
            }
        } else if let Some(caps) = IMAGE_RE.captures(trimmed) {
            if slide.image.is_none() {
                slide.image = Some(ImageRef {
                    alt: caps[1].to_string(),
                    path: caps[2].to_string(),
                });
            }
        }
    }

    slide
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_parses() {
        let content = include_str!("../../../../sample-decks/studio-reel.md");
        let deck = parse(content).unwrap();
        assert_eq!(deck.meta.title.as_deref(), Some("Studio Reel"));
        assert_eq!(deck.slides.len(), 5);
        assert_eq!(deck.slides[0].title.as_deref(), Some("Aperture"));
        assert!(deck.slides.iter().all(|s| s.directive("bg").is_some()));
        assert!(deck.slides.iter().all(|s| s.image.is_some()));
    }

    #[test]
    fn test_slide_fields() {
        let deck = parse("@bg: #1d3557\n# Aperture\n![Lens](images/lens.jpg)").unwrap();
        assert_eq!(deck.slides.len(), 1);
        let slide = &deck.slides[0];
        assert_eq!(slide.directive("bg"), Some("#1d3557"));
        assert_eq!(slide.title.as_deref(), Some("Aperture"));
        assert_eq!(
            slide.image,
            Some(ImageRef {
                alt: "Lens".to_string(),
                path: "images/lens.jpg".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_fields_stay_empty() {
        let deck = parse("Just some words").unwrap();
        let slide = &deck.slides[0];
        assert!(slide.title.is_none());
        assert!(slide.image.is_none());
        assert!(slide.directive("bg").is_none());
    }

    #[test]
    fn test_h2_is_not_a_title() {
        let deck = parse("@bg: #000\n## Subtitle").unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert!(deck.slides[0].title.is_none());
    }

    #[test]
    fn test_fenced_lines_are_ignored() {
        let content = "@bg: #000\n```sh\n# not a title\n![x](fenced.png)\n@bg: #fff\n```\n# Aperture\n![a](a.png)";
        let deck = parse(content).unwrap();
        let slide = &deck.slides[0];
        assert_eq!(slide.title.as_deref(), Some("Aperture"));
        assert_eq!(slide.image.as_ref().map(|i| i.path.as_str()), Some("a.png"));
        assert_eq!(slide.directive("bg"), Some("#000"));
        assert_eq!(slide.directives.len(), 1);
    }

    #[test]
    fn test_multiple_slides_by_separator() {
        let content = "@bg: #000\n# One\n![a](a.png)\n\n---\n\n@bg: #fff\n# Two\n![b](b.png)";
        let deck = parse(content).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[1].directive("bg"), Some("#fff"));
    }
}
