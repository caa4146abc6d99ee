//! Tweens and the transition timeline.
//!
//! Time is pushed in from outside with `advance(dt)`, so a timeline can be driven by
//! the egui frame clock or stepped by hand in tests.

use eframe::egui::{Color32, Pos2};

use crate::deck::Direction;
use crate::render::stack::CardTransform;

pub const STACK_DURATION: f32 = 0.8;
pub const ACCENT_DURATION: f32 = 1.2;
pub const ACCENT_OFFSET: f32 = 50.0;
pub const BACKGROUND_DURATION: f32 = 0.2;

/// Easing curves. `PowerN` follows the usual polynomial family (power1 = quad,
/// power2 = cubic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power1InOut,
    Power2Out,
    Power2InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

fn mix(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        mix(from, to, t)
    }
}

impl Lerp for Pos2 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Pos2::new(mix(from.x, to.x, t), mix(from.y, to.y, t))
    }
}

impl Lerp for Color32 {
    /// Straight per-channel interpolation in sRGB space.
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| mix(a as f32, b as f32, t).round() as u8;
        Color32::from_rgba_unmultiplied(
            channel(from.r(), to.r()),
            channel(from.g(), to.g()),
            channel(from.b(), to.b()),
            channel(from.a(), to.a()),
        )
    }
}

impl Lerp for CardTransform {
    /// `interactive` switches to the target state immediately.
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        CardTransform {
            depth: mix(from.depth, to.depth, t),
            offset_y: mix(from.offset_y, to.offset_y, t),
            scale: mix(from.scale, to.scale, t),
            opacity: mix(from.opacity, to.opacity, t),
            interactive: to.interactive,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            ease,
        }
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    pub fn sample(&self, elapsed: f32) -> T {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return T::lerp(self.from, self.to, self.ease.apply(0.0));
        }
        if self.duration <= 0.0 || local >= self.duration {
            return self.to;
        }
        T::lerp(self.from, self.to, self.ease.apply(local / self.duration))
    }
}

/// A single value that can be retargeted while it is moving.
#[derive(Debug, Clone, Copy)]
pub struct Animated<T> {
    tween: Tween<T>,
    elapsed: f32,
}

impl<T: Lerp> Animated<T> {
    pub fn settled(value: T) -> Self {
        Self {
            tween: Tween::new(value, value, 0.0, Ease::Linear),
            elapsed: 0.0,
        }
    }

    pub fn value(&self) -> T {
        self.tween.sample(self.elapsed)
    }

    pub fn target(&self) -> T {
        self.tween.to
    }

    /// Start a new tween from wherever the value is now.
    pub fn animate_to(&mut self, to: T, duration: f32, ease: Ease) {
        self.tween = Tween::new(self.value(), to, duration, ease);
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.is_finished() {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.tween.end()
    }
}

/// Signal that every tween of a transition has run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct TransitionComplete;

/// The settle-in accent on the newly active card's image.
#[derive(Debug, Clone, Copy)]
pub struct ImageAccent {
    pub slide: usize,
    tween: Tween<f32>,
}

impl ImageAccent {
    pub fn new(slide: usize, direction: Direction) -> Self {
        let start = match direction {
            Direction::Next => ACCENT_OFFSET,
            Direction::Prev => -ACCENT_OFFSET,
        };
        Self {
            slide,
            tween: Tween::new(start, 0.0, ACCENT_DURATION, Ease::Power2Out),
        }
    }
}

/// Sampled state of a timeline at one instant.
#[derive(Debug, Clone)]
pub struct Frame {
    pub cards: Vec<CardTransform>,
    pub accent_slide: usize,
    pub accent_offset: f32,
    pub background: Color32,
}

/// All tweens of one transition, started together at t = 0.
#[derive(Debug, Clone)]
pub struct Timeline {
    elapsed: f32,
    cards: Vec<Tween<CardTransform>>,
    accent: ImageAccent,
    background: Tween<Color32>,
    completed: bool,
}

impl Timeline {
    pub fn transition(
        from: &[CardTransform],
        to: &[CardTransform],
        direction: Direction,
        active: usize,
        background: (Color32, Color32),
    ) -> Self {
        let cards = from
            .iter()
            .zip(to)
            .map(|(f, t)| Tween::new(*f, *t, STACK_DURATION, Ease::Power2InOut))
            .collect();
        Self {
            elapsed: 0.0,
            cards,
            accent: ImageAccent::new(active, direction),
            background: Tween::new(
                background.0,
                background.1,
                BACKGROUND_DURATION,
                Ease::Power1InOut,
            ),
            completed: false,
        }
    }

    /// Length of the longest tween.
    pub fn duration(&self) -> f32 {
        self.cards
            .iter()
            .map(Tween::end)
            .fold(self.accent.tween.end(), f32::max)
            .max(self.background.end())
    }

    /// Step the clock. Yields [`TransitionComplete`] exactly once, on the step that
    /// reaches the end.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionComplete> {
        if self.completed {
            return None;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration() {
            self.completed = true;
            return Some(TransitionComplete);
        }
        None
    }

    pub fn frame(&self) -> Frame {
        Frame {
            cards: self.cards.iter().map(|t| t.sample(self.elapsed)).collect(),
            accent_slide: self.accent.slide,
            accent_offset: self.accent.tween.sample(self.elapsed),
            background: self.background.sample(self.elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::stack::{self, StackParams};

    fn sample_timeline(direction: Direction) -> Timeline {
        let params = StackParams::default();
        let from = stack::layout(0, 4, &params);
        let to = stack::layout(1, 4, &params);
        Timeline::transition(
            &from,
            &to,
            direction,
            1,
            (Color32::BLACK, Color32::WHITE),
        )
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power1Out,
            Ease::Power1InOut,
            Ease::Power2Out,
            Ease::Power2InOut,
        ] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Ease::Power2Out.apply(0.25) > 0.25);
    }

    #[test]
    fn test_tween_clamps() {
        let tween = Tween::new(0.0_f32, 10.0, 1.0, Ease::Linear);
        assert_eq!(tween.sample(-1.0), 0.0);
        assert_eq!(tween.sample(0.5), 5.0);
        assert_eq!(tween.sample(3.0), 10.0);
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let mid = <Color32 as Lerp>::lerp(Color32::BLACK, Color32::from_rgb(200, 100, 0), 0.5);
        assert_eq!(mid, Color32::from_rgb(100, 50, 0));
    }

    #[test]
    fn test_duration_is_the_image_accent() {
        let timeline = sample_timeline(Direction::Next);
        assert_eq!(timeline.duration(), ACCENT_DURATION);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut timeline = sample_timeline(Direction::Next);
        let mut fired = 0;
        for _ in 0..200 {
            if timeline.advance(1.0 / 60.0).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(timeline.advance(10.0).is_none());
    }

    #[test]
    fn test_not_complete_before_accent_settles() {
        let mut timeline = sample_timeline(Direction::Next);
        assert!(timeline.advance(STACK_DURATION + 0.1).is_none());
        let frame = timeline.frame();
        assert!(frame.accent_offset > 0.0);
        assert_eq!(frame.background, Color32::WHITE);
        assert!(timeline.advance(1.0).is_some());
    }

    #[test]
    fn test_accent_direction() {
        assert_eq!(sample_timeline(Direction::Next).frame().accent_offset, 50.0);
        assert_eq!(sample_timeline(Direction::Prev).frame().accent_offset, -50.0);
    }

    #[test]
    fn test_frame_ends_at_target_layout() {
        let params = StackParams::default();
        let mut timeline = sample_timeline(Direction::Next);
        let _ = timeline.advance(5.0);
        let frame = timeline.frame();
        assert_eq!(frame.cards, stack::layout(1, 4, &params));
        assert_eq!(frame.accent_offset, 0.0);
    }

    #[test]
    fn test_interactive_switches_immediately() {
        let frame = sample_timeline(Direction::Next).frame();
        assert!(!frame.cards[0].interactive);
        assert!(frame.cards[1].interactive);
    }

    #[test]
    fn test_animated_retarget_starts_from_current_value() {
        let mut value = Animated::settled(0.0_f32);
        value.animate_to(10.0, 1.0, Ease::Linear);
        value.advance(0.5);
        assert_eq!(value.value(), 5.0);
        value.animate_to(0.0, 1.0, Ease::Linear);
        assert_eq!(value.value(), 5.0);
        value.advance(2.0);
        assert!(value.is_finished());
        assert_eq!(value.value(), 0.0);
    }
}
