use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::deck::Deck;
use crate::render::chrome;

/// Validate a deck the same way presenting it would, then list its slides.
pub fn run(file: &Path, quiet: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let deck = Deck::load(file)?;

    if !quiet {
        for (i, slide) in deck.slides.iter().enumerate() {
            let [r, g, b, _] = slide.background.to_array();
            let swatch = format!("#{r:02x}{g:02x}{b:02x}");
            let image = if slide.image.exists() {
                slide.image.display().to_string().normal()
            } else {
                format!("{} (missing)", slide.image.display()).yellow()
            };
            println!(
                "  {}  {}  {}  {}",
                chrome::slide_number(i).dimmed(),
                swatch,
                slide.title.bold(),
                image
            );
        }
    }

    println!(
        "{} {} slides in {}",
        "OK".green().bold(),
        deck.len(),
        file.display()
    );
    Ok(())
}
