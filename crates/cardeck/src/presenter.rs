use eframe::egui::Color32;

use crate::deck::{Deck, DeckState, Direction};
use crate::render::chrome::Chrome;
use crate::render::stack::{self, CardTransform, StackParams};
use crate::render::timeline::{Animated, BACKGROUND_DURATION, Ease, Timeline};

/// Background shown before the first slide's color fades in.
pub const STARTUP_BACKGROUND: Color32 = Color32::from_rgb(0x1E, 0x1E, 0x1E);

struct SlideInfo {
    title: String,
    background: Color32,
}

/// Drives the deck state and everything derived from it: the card stack, the
/// in-flight timeline, the background and the chrome.
///
/// Free of any UI handle so it can be stepped frame by frame in tests.
pub struct Presenter {
    state: DeckState,
    params: StackParams,
    slides: Vec<SlideInfo>,
    resting: Vec<CardTransform>,
    timeline: Option<Timeline>,
    background: Animated<Color32>,
    chrome: Chrome,
}

impl Presenter {
    /// Lay out the resting stack anchored at the first card and sync the chrome.
    pub fn new(deck: &Deck, params: StackParams) -> Self {
        let slides: Vec<SlideInfo> = deck
            .slides
            .iter()
            .map(|s| SlideInfo {
                title: s.title.clone(),
                background: s.background,
            })
            .collect();
        let len = slides.len();
        let mut presenter = Self {
            state: DeckState::new(len),
            params,
            resting: stack::initial_layout(len, &params),
            slides,
            timeline: None,
            background: Animated::settled(STARTUP_BACKGROUND),
            chrome: Chrome::for_slide(0, len, ""),
        };
        presenter.sync_chrome();
        presenter
    }

    /// Begin on another card without animating the stack.
    pub fn start_at(&mut self, index: usize) {
        self.state.start_at(index);
        let current = self.state.current();
        self.resting = stack::layout(current, self.len(), &self.params);
        self.sync_chrome();
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn current(&self) -> usize {
        self.state.current()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Advance or retreat one card. Returns `false` if the request was dropped.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if !self.state.navigate(direction) {
            return false;
        }
        self.begin_transition(direction);
        true
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.state.jump_to(index) {
            Some(direction) => {
                self.begin_transition(direction);
                true
            }
            None => false,
        }
    }

    fn begin_transition(&mut self, direction: Direction) {
        let current = self.state.current();
        let target = stack::layout(current, self.len(), &self.params);
        let from_background = self.background.value();
        let to_background = self.slides[current].background;
        self.timeline = Some(Timeline::transition(
            &self.cards(),
            &target,
            direction,
            current,
            (from_background, to_background),
        ));
        self.resting = target;
        self.background = Animated::settled(to_background);
        self.sync_chrome();
    }

    fn sync_chrome(&mut self) {
        let current = self.state.current();
        let Some(slide) = self.slides.get(current) else {
            return;
        };
        self.chrome = Chrome::for_slide(current, self.slides.len(), &slide.title);
        if self.timeline.is_none() && self.background.target() != slide.background {
            self.background
                .animate_to(slide.background, BACKGROUND_DURATION, Ease::Power1InOut);
        }
    }

    /// Step all animations by `dt` seconds. Releases the navigation latch once the
    /// running timeline reports completion.
    pub fn advance(&mut self, dt: f32) {
        self.background.advance(dt);
        let completed = self
            .timeline
            .as_mut()
            .and_then(|timeline| timeline.advance(dt));
        if completed.is_some() {
            self.timeline = None;
            self.state.on_transition_complete();
        }
    }

    /// True while something still needs repainting.
    pub fn is_moving(&self) -> bool {
        self.timeline.is_some() || !self.background.is_finished()
    }

    /// Per-card transforms as they should be drawn right now.
    pub fn cards(&self) -> Vec<CardTransform> {
        match &self.timeline {
            Some(timeline) => timeline.frame().cards,
            None => self.resting.clone(),
        }
    }

    /// `(slide, vertical offset)` of the image settling into the active card.
    pub fn image_accent(&self) -> Option<(usize, f32)> {
        self.timeline.as_ref().map(|timeline| {
            let frame = timeline.frame();
            (frame.accent_slide, frame.accent_offset)
        })
    }

    pub fn background(&self) -> Color32 {
        match &self.timeline {
            Some(timeline) => timeline.frame().background,
            None => self.background.value(),
        }
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }
}
