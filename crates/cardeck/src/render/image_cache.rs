use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui;
use rayon::prelude::*;

/// Decoded slide images, uploaded once at startup. Slot `i` belongs to slide `i`.
pub struct ImageCache {
    textures: Vec<Option<egui::TextureHandle>>,
}

impl ImageCache {
    /// Decode every image in parallel, then upload on the UI thread.
    /// Images that fail to load leave an empty slot and are logged.
    pub fn preload(ctx: &egui::Context, paths: &[PathBuf]) -> Self {
        let decoded: Vec<Option<egui::ColorImage>> = paths
            .par_iter()
            .map(|path| match decode(path) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!("{e:#}");
                    None
                }
            })
            .collect();

        let textures = decoded
            .into_iter()
            .zip(paths)
            .map(|(image, path)| {
                image.map(|image| {
                    ctx.load_texture(
                        path.display().to_string(),
                        image,
                        egui::TextureOptions::LINEAR,
                    )
                })
            })
            .collect();

        Self { textures }
    }

    pub fn get(&self, index: usize) -> Option<&egui::TextureHandle> {
        self.textures.get(index).and_then(Option::as_ref)
    }
}

fn decode(path: &Path) -> Result<egui::ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?
        .into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}

/// Largest rect with the texture's aspect ratio that covers `bounds` (center crop).
pub fn cover_uv(texture_size: egui::Vec2, bounds: egui::Vec2) -> egui::Rect {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 || bounds.x <= 0.0 || bounds.y <= 0.0 {
        return egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
    }
    let texture_aspect = texture_size.x / texture_size.y;
    let bounds_aspect = bounds.x / bounds.y;
    if texture_aspect > bounds_aspect {
        let visible = bounds_aspect / texture_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = texture_aspect / bounds_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}
