pub mod chrome;
pub mod image_cache;
pub mod stack;
pub mod timeline;

use eframe::egui;

use crate::deck::Slide;
use crate::theme::Theme;

use image_cache::ImageCache;
use stack::CardTransform;

/// Share of the card taken by the image; the title sits below it.
const IMAGE_SHARE: f32 = 0.8;

/// Resting rect of the active card inside the stage.
pub fn card_rect(stage: egui::Rect) -> egui::Rect {
    let height = stage.height() * 0.62;
    let width = (height * 0.8).min(stage.width() * 0.8);
    egui::Rect::from_center_size(
        stage.center() + egui::vec2(0.0, stage.height() * 0.04),
        egui::vec2(width, height),
    )
}

/// Apply a card transform to its resting rect. `ui_scale` converts the logical
/// offset to screen pixels.
pub fn transformed_rect(base: egui::Rect, transform: &CardTransform, ui_scale: f32) -> egui::Rect {
    egui::Rect::from_center_size(
        base.center() + egui::vec2(0.0, transform.offset_y * ui_scale),
        base.size() * transform.scale,
    )
}

/// Paint one card: shadow, body, image (shifted by `image_offset`) and title.
#[allow(clippy::too_many_arguments)]
pub fn draw_card(
    ui: &egui::Ui,
    index: usize,
    slide: &Slide,
    images: &ImageCache,
    theme: &Theme,
    rect: egui::Rect,
    transform: &CardTransform,
    image_offset: f32,
    ui_scale: f32,
) {
    if !transform.is_visible() {
        return;
    }
    let opacity = transform.opacity;
    let card_scale = transform.scale * ui_scale;
    let painter = ui.painter();
    let corner = 10.0 * card_scale;

    painter.rect_filled(
        rect.translate(egui::vec2(0.0, 8.0 * card_scale)),
        corner,
        Theme::with_opacity(theme.card_shadow, opacity),
    );
    painter.rect_filled(
        rect,
        corner,
        Theme::with_opacity(theme.card_background, opacity),
    );

    let inset = 12.0 * card_scale;
    let image_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(inset, inset),
        egui::vec2(
            rect.width() - inset * 2.0,
            rect.height() * IMAGE_SHARE - inset,
        ),
    );
    let clipped = painter.with_clip_rect(image_rect.intersect(ui.clip_rect()));
    match images.get(index) {
        Some(texture) => {
            let uv = image_cache::cover_uv(texture.size_vec2(), image_rect.size());
            clipped.image(
                texture.id(),
                image_rect.translate(egui::vec2(0.0, image_offset * card_scale)),
                uv,
                egui::Color32::WHITE.gamma_multiply(opacity),
            );
        }
        None => {
            clipped.rect_filled(
                image_rect,
                4.0 * card_scale,
                Theme::with_opacity(theme.placeholder, opacity),
            );
            let alt = painter.layout_no_wrap(
                slide.image_alt.clone(),
                egui::FontId::proportional(16.0 * card_scale),
                Theme::with_opacity(theme.foreground, 0.4 * opacity),
            );
            let pos = image_rect.center()
                + egui::vec2(
                    -alt.rect.width() / 2.0,
                    image_offset * card_scale - alt.rect.height() / 2.0,
                );
            clipped.galley(pos, alt, theme.foreground);
        }
    }

    let title_color = Theme::with_opacity(theme.foreground, opacity);
    let title_top = image_rect.bottom() + inset;
    let galley = painter.layout(
        slide.title.clone(),
        egui::FontId::proportional(theme.title_size * 0.6 * card_scale),
        title_color,
        image_rect.width(),
    );
    let title_bottom_space = rect.bottom() - title_top;
    let pos = egui::pos2(
        image_rect.left(),
        title_top + (title_bottom_space - galley.rect.height()) / 2.0,
    );
    painter.galley(pos, galley, title_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::stack::StackParams;

    #[test]
    fn test_card_rect_is_inside_stage() {
        let stage = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 720.0));
        let card = card_rect(stage);
        assert!(stage.contains_rect(card));
        assert_eq!(card.center().x, stage.center().x);
    }

    #[test]
    fn test_transformed_rect_moves_and_scales() {
        let base = egui::Rect::from_center_size(egui::pos2(100.0, 100.0), egui::vec2(80.0, 100.0));
        let t = CardTransform::at_distance(2, 5, &StackParams::default());
        let r = transformed_rect(base, &t, 2.0);
        assert_eq!(r.center(), egui::pos2(100.0, 0.0));
        assert!((r.width() - 72.0).abs() < 1e-4);
    }
}
