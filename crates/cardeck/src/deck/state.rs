/// Direction of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
        }
    }
}

/// Which card is active, plus the latch that serializes transitions.
///
/// `current` is updated as soon as a request is accepted; the renderer catches up
/// asynchronously and reports back through [`DeckState::on_transition_complete`].
#[derive(Debug, Clone)]
pub struct DeckState {
    len: usize,
    current: usize,
    animating: bool,
}

impl DeckState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            animating: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Wrap an arbitrary signed index into `[0, len)`.
    pub fn wrap(&self, index: isize) -> usize {
        if self.len == 0 {
            return 0;
        }
        index.rem_euclid(self.len as isize) as usize
    }

    /// Move one card forward or back, wrapping at both ends.
    ///
    /// Returns `false` without touching state while a transition is in flight or
    /// when the wrapped target is the current card (only possible with one slide).
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = self.wrap(self.current as isize + direction.delta());
        self.accept(target)
    }

    /// Jump straight to `index`, through the same gate as [`DeckState::navigate`].
    ///
    /// Returns the direction the accent should travel in, or `None` if rejected.
    pub fn jump_to(&mut self, index: usize) -> Option<Direction> {
        if index >= self.len {
            return None;
        }
        let direction = if index > self.current {
            Direction::Next
        } else {
            Direction::Prev
        };
        self.accept(index).then_some(direction)
    }

    fn accept(&mut self, target: usize) -> bool {
        if self.animating || target == self.current {
            tracing::trace!(
                current = self.current,
                target,
                animating = self.animating,
                "navigation rejected"
            );
            return false;
        }
        self.animating = true;
        self.current = target;
        tracing::debug!(current = self.current, "navigation accepted");
        true
    }

    /// Release the latch. Called once per accepted request, after the last tween ends.
    pub fn on_transition_complete(&mut self) {
        self.animating = false;
        tracing::debug!(current = self.current, "transition complete");
    }

    /// Set the starting card without animating. Used before the first frame.
    pub fn start_at(&mut self, index: usize) {
        if index < self.len && !self.animating {
            self.current = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retreat_from_first_wraps_to_last() {
        let mut state = DeckState::new(5);
        assert!(state.navigate(Direction::Prev));
        assert_eq!(state.current(), 4);
    }

    #[test]
    fn test_advance_from_last_wraps_to_first() {
        let mut state = DeckState::new(3);
        for _ in 0..2 {
            assert!(state.navigate(Direction::Next));
            state.on_transition_complete();
        }
        assert_eq!(state.current(), 2);
        assert!(state.navigate(Direction::Next));
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_index_stays_in_range_for_mixed_sequences() {
        for len in 2..8 {
            let mut state = DeckState::new(len);
            let pattern = [
                Direction::Prev,
                Direction::Prev,
                Direction::Next,
                Direction::Prev,
                Direction::Next,
                Direction::Next,
                Direction::Next,
            ];
            for (step, direction) in pattern.iter().cycle().take(40).enumerate() {
                assert!(state.navigate(*direction), "step {step} for len {len}");
                assert!(state.current() < len);
                state.on_transition_complete();
            }
        }
    }

    #[test]
    fn test_navigate_while_animating_is_noop() {
        let mut state = DeckState::new(4);
        assert!(state.navigate(Direction::Next));
        assert!(state.is_animating());
        assert!(!state.navigate(Direction::Next));
        assert!(!state.navigate(Direction::Prev));
        assert_eq!(state.current(), 1);
        assert!(state.is_animating());
    }

    #[test]
    fn test_completion_reopens_the_gate() {
        let mut state = DeckState::new(4);
        assert!(state.navigate(Direction::Next));
        state.on_transition_complete();
        assert!(!state.is_animating());
        assert!(state.navigate(Direction::Next));
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_single_slide_never_navigates() {
        let mut state = DeckState::new(1);
        assert!(!state.navigate(Direction::Next));
        assert!(!state.navigate(Direction::Prev));
        assert_eq!(state.current(), 0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_jump_to_reports_direction() {
        let mut state = DeckState::new(6);
        assert_eq!(state.jump_to(4), Some(Direction::Next));
        state.on_transition_complete();
        assert_eq!(state.jump_to(0), Some(Direction::Prev));
    }

    #[test]
    fn test_jump_to_rejects_current_and_out_of_range() {
        let mut state = DeckState::new(3);
        assert_eq!(state.jump_to(0), None);
        assert_eq!(state.jump_to(3), None);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_start_at_does_not_latch() {
        let mut state = DeckState::new(3);
        state.start_at(2);
        assert_eq!(state.current(), 2);
        assert!(!state.is_animating());
        state.start_at(9);
        assert_eq!(state.current(), 2);
    }
}
