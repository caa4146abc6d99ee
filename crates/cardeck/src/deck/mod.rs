pub mod state;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::Deserialize;

use crate::config::{Config, CursorConfig, InputConfig, StackConfig};
use crate::parser::{self, ParsedDeck};

pub use state::{Direction, DeckState};

pub const DEFAULT_Y_OFFSET: f32 = 25.0;
pub const DEFAULT_SCALE_STEP: f32 = 0.05;
pub const DEFAULT_MIN_SCALE: f32 = 0.1;
pub const DEFAULT_DRAG_THRESHOLD: f32 = 30.0;

/// Deck-wide settings from the frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub stack: Option<StackConfig>,
    #[serde(default)]
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub cursor: Option<CursorConfig>,
}

impl DeckMeta {
    pub fn validate(&self) -> Result<()> {
        if let Some(stack) = &self.stack {
            stack.validate().context("Frontmatter")?;
        }
        if let Some(input) = &self.input {
            input.validate().context("Frontmatter")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub title: String,
    pub background: Color32,
    pub image: PathBuf,
    pub image_alt: String,
}

/// A validated deck. Slide count and content are fixed from here on.
#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let base_path = path.parent().unwrap_or(Path::new("."));
        let parsed = parser::parse(&content)?;
        let deck = Self::bind(parsed, base_path)?;
        tracing::info!(
            slides = deck.slides.len(),
            "loaded deck from {}",
            path.display()
        );
        Ok(deck)
    }

    /// Check every slide for the background, title and image it needs to be shown.
    pub fn bind(parsed: ParsedDeck, base_path: &Path) -> Result<Self> {
        if parsed.slides.is_empty() {
            anyhow::bail!("No slides found");
        }
        parsed.meta.validate()?;

        let mut slides = Vec::with_capacity(parsed.slides.len());
        for (i, raw) in parsed.slides.iter().enumerate() {
            let number = i + 1;
            let Some(token) = raw.directive("bg") else {
                anyhow::bail!("Slide {number} is missing a background (`@bg: #rrggbb`)");
            };
            let background =
                parse_color(token).with_context(|| format!("Slide {number} background"))?;
            let Some(title) = raw.title.clone() else {
                anyhow::bail!("Slide {number} is missing a title (`# Title`)");
            };
            let Some(image) = raw.image.as_ref() else {
                anyhow::bail!("Slide {number} is missing an image (`![alt](path)`)");
            };
            slides.push(Slide {
                title,
                background,
                image: base_path.join(&image.path),
                image_alt: image.alt.clone(),
            });
        }

        Ok(Self {
            meta: parsed.meta,
            slides,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }
}

/// Parse `#rgb` or `#rrggbb` (the `#` is optional).
pub fn parse_color(token: &str) -> Result<Color32> {
    let hex = token.trim().trim_start_matches('#');
    let valid = hex.chars().all(|c| c.is_ascii_hexdigit());
    let channel = |s: &str| u8::from_str_radix(s, 16);
    match hex.len() {
        6 if valid => Ok(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 if valid => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => anyhow::bail!("Invalid color: {token}. Expected #rgb or #rrggbb."),
    }
}

/// Effective tuning constants: deck frontmatter, then config file, then defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub y_offset: f32,
    pub scale_step: f32,
    pub min_scale: f32,
    pub drag_threshold: f32,
    pub cursor_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            y_offset: DEFAULT_Y_OFFSET,
            scale_step: DEFAULT_SCALE_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            cursor_enabled: true,
        }
    }
}

impl Tuning {
    pub fn resolve(config: &Config, meta: &DeckMeta) -> Self {
        let defaults = Self::default();
        let stack = |f: fn(&StackConfig) -> Option<f32>| {
            meta.stack
                .as_ref()
                .and_then(f)
                .or_else(|| config.stack.as_ref().and_then(f))
        };
        let drag_threshold = |i: &InputConfig| i.drag_threshold;
        let enabled = |c: &CursorConfig| c.enabled;

        Self {
            y_offset: stack(|s| s.y_offset).unwrap_or(defaults.y_offset),
            scale_step: stack(|s| s.scale_step).unwrap_or(defaults.scale_step),
            min_scale: stack(|s| s.min_scale).unwrap_or(defaults.min_scale),
            drag_threshold: meta
                .input
                .as_ref()
                .and_then(drag_threshold)
                .or_else(|| config.input.as_ref().and_then(drag_threshold))
                .unwrap_or(defaults.drag_threshold),
            cursor_enabled: meta
                .cursor
                .as_ref()
                .and_then(enabled)
                .or_else(|| config.cursor.as_ref().and_then(enabled))
                .unwrap_or(defaults.cursor_enabled),
        }
    }
}
