use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub foreground: Color32,
    pub accent: Color32,
    pub card_background: Color32,
    pub card_shadow: Color32,
    pub placeholder: Color32,
    pub cursor: Color32,
    pub title_size: f32,
    pub status_size: f32,
    pub toast_background: Color32,
}

impl Theme {
    /// Light text and chrome, for dark slide backgrounds.
    pub fn dark() -> Self {
        Self {
            foreground: Color32::from_rgb(0xF1, 0xF1, 0xEE),
            accent: Color32::WHITE,
            card_background: Color32::from_rgb(0x14, 0x14, 0x16),
            card_shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 90),
            placeholder: Color32::from_rgb(0x2B, 0x2B, 0x30),
            cursor: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 200),
            title_size: 44.0,
            status_size: 15.0,
            toast_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
        }
    }

    /// Dark text and chrome, for light slide backgrounds.
    pub fn light() -> Self {
        Self {
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            accent: Color32::from_rgb(0x10, 0x10, 0x10),
            card_background: Color32::from_rgb(0xFA, 0xFA, 0xF7),
            card_shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 50),
            placeholder: Color32::from_rgb(0xE4, 0xE4, 0xE0),
            cursor: Color32::from_rgba_unmultiplied(0x10, 0x10, 0x10, 200),
            title_size: 44.0,
            status_size: 15.0,
            toast_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
        }
    }

    /// Pick the theme whose text reads best on `background`.
    pub fn for_background(background: Color32) -> Self {
        if relative_luminance(background) > 0.5 {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let opacity = opacity.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity * color.a() as f32) as u8,
        )
    }
}

/// Rec. 709 luma on gamma-encoded channels, in `[0, 1]`.
fn relative_luminance(color: Color32) -> f32 {
    (0.2126 * color.r() as f32 + 0.7152 * color.g() as f32 + 0.0722 * color.b() as f32) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_background() {
        assert_eq!(
            Theme::for_background(Color32::WHITE).foreground,
            Theme::light().foreground
        );
        assert_eq!(
            Theme::for_background(Color32::from_rgb(0x1d, 0x35, 0x57)).foreground,
            Theme::dark().foreground
        );
    }

    #[test]
    fn test_with_opacity_scales_alpha() {
        let c = Theme::with_opacity(Color32::from_rgb(10, 20, 30), 0.5);
        assert_eq!(c.a(), 127);
        assert_eq!(Theme::with_opacity(Color32::WHITE, 2.0).a(), 255);
    }
}
