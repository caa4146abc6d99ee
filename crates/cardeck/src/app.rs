use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::deck::{Deck, Direction, Tuning};
use crate::input::cursor::CursorFollower;
use crate::input::drag::DragTracker;
use crate::presenter::Presenter;
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::render::stack::{self, StackParams};
use crate::theme::Theme;

/// Longest frame step fed to the animations, so a stalled frame does not skip a
/// whole transition.
const MAX_FRAME_DT: f32 = 0.1;

/// Seconds a toast stays on screen, and when it starts fading.
const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct DeckApp {
    deck: Deck,
    presenter: Presenter,
    images: ImageCache,
    drag: DragTracker,
    cursor: CursorFollower,
    cursor_enabled: bool,
    show_hud: bool,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    /// Stack area from the last frame, for hit-testing pointer input
    last_stage_rect: egui::Rect,
}

impl DeckApp {
    fn new(deck: Deck, tuning: Tuning, images: ImageCache) -> Self {
        let presenter = Presenter::new(&deck, StackParams::from(&tuning));
        Self {
            deck,
            presenter,
            images,
            drag: DragTracker::new(tuning.drag_threshold),
            cursor: CursorFollower::default(),
            cursor_enabled: tuning.cursor_enabled,
            show_hud: false,
            toast: None,
            last_esc: None,
            last_stage_rect: egui::Rect::NOTHING,
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.presenter.navigate(direction);
    }

    fn handle_pointer_input(&mut self, ctx: &egui::Context) {
        let (pressed, down, released, hover, latest) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.hover_pos(),
                i.pointer.latest_pos(),
            )
        });

        if let Some(pos) = hover {
            self.cursor.pointer_moved(pos);
            self.cursor
                .set_hovering(self.last_stage_rect.contains(pos));
        } else {
            self.cursor.set_hovering(false);
        }

        if pressed {
            if let Some(pos) = latest.filter(|p| self.last_stage_rect.contains(*p)) {
                self.drag.press(pos.y);
            }
        } else if down {
            if let Some(pos) = latest {
                self.drag.drag(pos.y);
            }
        }

        if released {
            if let Some(pos) = latest {
                self.drag.drag(pos.y);
            }
            if let Some(direction) = self.drag.release() {
                self.navigate(direction);
            }
        } else if hover.is_none() && !down {
            self.drag.cancel();
        }

        if self.cursor_enabled && hover.is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }
    }

    fn draw_stack(&self, ui: &egui::Ui, stage: egui::Rect, theme: &Theme, scale: f32) {
        let base = render::card_rect(stage);
        let cards = self.presenter.cards();
        let accent = self.presenter.image_accent();

        for index in stack::paint_order(&cards) {
            let transform = &cards[index];
            let rect = render::transformed_rect(base, transform, scale);
            let image_offset = match accent {
                Some((slide, offset)) if slide == index => offset,
                _ => 0.0,
            };
            render::draw_card(
                ui,
                index,
                &self.deck.slides[index],
                &self.images,
                theme,
                rect,
                transform,
                image_offset,
                scale,
            );
        }

        // Swipe handle under the stack; it never follows the drag.
        let handle_center = egui::pos2(
            stage.center().x,
            base.bottom() + 28.0 * scale + self.drag.handle_offset(),
        );
        let handle_alpha = if self.drag.is_dragging() { 0.6 } else { 0.25 };
        ui.painter().rect_filled(
            egui::Rect::from_center_size(handle_center, egui::vec2(48.0 * scale, 4.0 * scale)),
            2.0 * scale,
            Theme::with_opacity(theme.foreground, handle_alpha),
        );
    }

    fn draw_cursor(&self, ui: &egui::Ui, theme: &Theme) {
        if !self.cursor_enabled || !self.cursor.is_visible() {
            return;
        }
        let rect = self.cursor.rect();
        ui.painter()
            .circle_filled(rect.center(), rect.width() / 2.0, theme.cursor);
    }

    fn draw_toast(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        let Some(ref toast) = self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(theme.toast_background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 120.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1280.0;
        let ref_h = 720.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DT);

        // Collect viewport commands to send after the input closure
        // (sending inside ctx.input() deadlocks)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut requests: Vec<Direction> = Vec::new();
        let mut jump: Option<usize> = None;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit".to_string()));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }

            if i.key_pressed(egui::Key::ArrowUp)
                || i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::Space)
                || i.key_pressed(egui::Key::N)
            {
                requests.push(Direction::Next);
            }
            if i.key_pressed(egui::Key::ArrowDown)
                || i.key_pressed(egui::Key::ArrowLeft)
                || i.key_pressed(egui::Key::P)
            {
                requests.push(Direction::Prev);
            }
            if i.key_pressed(egui::Key::Home) {
                jump = Some(0);
            }
            if i.key_pressed(egui::Key::End) {
                jump = Some(self.presenter.len().saturating_sub(1));
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for direction in requests {
            self.navigate(direction);
        }
        if let Some(index) = jump {
            self.presenter.jump_to(index);
        }

        self.handle_pointer_input(ctx);

        self.presenter.advance(dt);
        self.cursor.advance(dt);

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.presenter.background();
        let theme = Theme::for_background(bg);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::compute_scale(rect);

                let stage = rect.shrink2(egui::vec2(0.0, 72.0 * scale));
                self.last_stage_rect = stage;

                self.draw_stack(ui, stage, &theme, scale);
                self.presenter.chrome().draw(ui, &theme, rect, scale);
                self.draw_toast(ui, &theme, rect, scale);
                if self.show_hud {
                    draw_hud(ui, &theme, rect, scale);
                }
                self.draw_cursor(ui, &theme);
            });

        if self.presenter.is_moving() || self.cursor.is_moving() || self.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let shortcuts = [
        ("Drag up / \u{2191} / Space", "Next card"),
        ("Drag down / \u{2193}", "Previous card"),
        ("\u{2192} / N", "Next card"),
        ("\u{2190} / P", "Previous card"),
        ("Home / End", "First / last card"),
        ("F", "Toggle fullscreen"),
        ("H", "Toggle this HUD"),
        ("Esc \u{00d7}2 / Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.toast_background, 0.9);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 30.0 * scale;
    let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 420.0 * scale;
    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));

    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0 * scale),
        text_color,
    );
    let title_pos = egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding);
    ui.painter().galley(title_pos, title_galley, text_color);

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(hud_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding + 220.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let deck = Deck::load(&file)?;
    let config = Config::load_or_default();
    let tuning = Tuning::resolve(&config, &deck.meta);
    tracing::debug!(?tuning, "resolved tuning");

    let windowed = windowed
        || config
            .defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false);

    let title = deck.meta.title.clone().unwrap_or_else(|| {
        format!(
            "cardeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let initial_slide = start_slide
        .map(|s| s.saturating_sub(1))
        .unwrap_or(0)
        .min(deck.len().saturating_sub(1));

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let paths: Vec<PathBuf> = deck.slides.iter().map(|s| s.image.clone()).collect();
            let images = ImageCache::preload(&cc.egui_ctx, &paths);
            let mut app = DeckApp::new(deck, tuning, images);
            if initial_slide > 0 {
                app.presenter.start_at(initial_slide);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
