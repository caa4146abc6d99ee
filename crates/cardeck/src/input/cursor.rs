use eframe::egui::{Pos2, Rect, Vec2, vec2};

use crate::render::timeline::{Animated, Ease};

const FOLLOW_DURATION: f32 = 0.15;
const HOVER_DURATION: f32 = 0.3;
const HOVER_SCALE: f32 = 1.5;
const DEFAULT_SIZE: f32 = 24.0;

/// Decorative disc that trails the pointer.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    size: Vec2,
    position: Animated<Pos2>,
    scale: Animated<f32>,
    hovering: bool,
    seen: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(vec2(DEFAULT_SIZE, DEFAULT_SIZE))
    }
}

impl CursorFollower {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            position: Animated::settled(Pos2::ZERO),
            scale: Animated::settled(1.0),
            hovering: false,
            seen: false,
        }
    }

    /// Chase a new pointer position. The first sighting snaps so the disc
    /// does not fly in from the corner.
    pub fn pointer_moved(&mut self, pointer: Pos2) {
        let target = pointer - self.size / 2.0;
        if !self.seen {
            self.position = Animated::settled(target);
            self.seen = true;
        } else if self.position.target() != target {
            self.position
                .animate_to(target, FOLLOW_DURATION, Ease::Power2Out);
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        if hovering == self.hovering {
            return;
        }
        self.hovering = hovering;
        let scale = if hovering { HOVER_SCALE } else { 1.0 };
        self.scale.animate_to(scale, HOVER_DURATION, Ease::Power1Out);
    }

    pub fn advance(&mut self, dt: f32) {
        self.position.advance(dt);
        self.scale.advance(dt);
    }

    pub fn is_moving(&self) -> bool {
        !self.position.is_finished() || !self.scale.is_finished()
    }

    pub fn is_visible(&self) -> bool {
        self.seen
    }

    pub fn top_left(&self) -> Pos2 {
        self.position.value()
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Unscaled box of the disc; the hover scale grows it around its center.
    pub fn rect(&self) -> Rect {
        let base = Rect::from_min_size(self.top_left(), self.size);
        Rect::from_center_size(base.center(), self.size * self.scale())
    }
}
