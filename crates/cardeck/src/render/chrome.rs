use eframe::egui;

use crate::theme::Theme;

pub const FIRST_STATUS_CODE: &str = "[00]";
pub const OTHER_STATUS_CODE: &str = "[50]";

/// Two-digit, 1-based slide number.
pub fn slide_number(index: usize) -> String {
    format!("{:02}", index + 1)
}

/// `"02 - 3 Aperture"` for the second of three slides.
pub fn status_text(index: usize, total: usize, title: &str) -> String {
    format!("{} - {total} {title}", slide_number(index))
}

pub fn status_code(index: usize) -> &'static str {
    if index == 0 {
        FIRST_STATUS_CODE
    } else {
        OTHER_STATUS_CODE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub label: String,
    pub active: bool,
}

pub fn ticks(total: usize, current: usize) -> Vec<Tick> {
    (0..total)
        .map(|i| Tick {
            label: slide_number(i),
            active: i == current,
        })
        .collect()
}

/// Everything the status bar and tick row show for the active slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub status: String,
    pub code: &'static str,
    pub ticks: Vec<Tick>,
}

impl Chrome {
    pub fn for_slide(index: usize, total: usize, title: &str) -> Self {
        Self {
            status: status_text(index, total, title),
            code: status_code(index),
            ticks: ticks(total, index),
        }
    }

    /// Status bar across the top, tick row along the bottom.
    pub fn draw(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        let painter = ui.painter();
        let text_color = Theme::with_opacity(theme.foreground, 0.9);
        let muted = Theme::with_opacity(theme.foreground, 0.5);
        let font = egui::FontId::monospace(theme.status_size * scale);

        let code_galley = painter.layout_no_wrap(self.code.to_string(), font.clone(), muted);
        let status_galley = painter.layout_no_wrap(self.status.clone(), font, text_color);
        let gap = 16.0 * scale;
        let total_w = code_galley.rect.width() + gap + status_galley.rect.width();
        let top = rect.top() + 28.0 * scale;
        let left = rect.center().x - total_w / 2.0;
        let code_w = code_galley.rect.width();
        painter.galley(egui::pos2(left, top), code_galley, muted);
        painter.galley(
            egui::pos2(left + code_w + gap, top),
            status_galley,
            text_color,
        );

        if self.ticks.is_empty() {
            return;
        }
        let spacing = 14.0 * scale;
        let row_w = spacing * (self.ticks.len() as f32 - 1.0);
        let base_y = rect.bottom() - 36.0 * scale;
        let start_x = rect.center().x - row_w / 2.0;
        for (i, tick) in self.ticks.iter().enumerate() {
            let x = start_x + i as f32 * spacing;
            let (height, color) = if tick.active {
                (18.0 * scale, theme.accent)
            } else {
                (8.0 * scale, muted)
            };
            painter.line_segment(
                [egui::pos2(x, base_y - height), egui::pos2(x, base_y)],
                egui::Stroke::new(2.0 * scale, color),
            );
            if tick.active {
                let label = painter.layout_no_wrap(
                    tick.label.clone(),
                    egui::FontId::monospace(11.0 * scale),
                    color,
                );
                let pos = egui::pos2(x - label.rect.width() / 2.0, base_y + 6.0 * scale);
                painter.galley(pos, label, color);
            }
        }
    }
}
