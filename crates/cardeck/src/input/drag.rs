use crate::deck::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging { start_y: f32, current_y: f32 },
}

/// Turns one vertical drag into at most one navigation request.
///
/// The swipe handle never follows the pointer: its offset stays at the origin for
/// the whole gesture and release puts the tracker back to idle.
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f32,
    gesture: Gesture,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            gesture: Gesture::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn press(&mut self, y: f32) {
        self.gesture = Gesture::Dragging {
            start_y: y,
            current_y: y,
        };
    }

    pub fn drag(&mut self, y: f32) {
        if let Gesture::Dragging { current_y, .. } = &mut self.gesture {
            *current_y = y;
        }
    }

    /// Upward travel since the press, in logical pixels.
    pub fn displacement(&self) -> f32 {
        match self.gesture {
            Gesture::Dragging { start_y, current_y } => start_y - current_y,
            Gesture::Idle => 0.0,
        }
    }

    /// Visual offset of the swipe handle. Pinned at the origin.
    pub fn handle_offset(&self) -> f32 {
        0.0
    }

    /// End the gesture. Dragging up past the threshold advances, down retreats.
    pub fn release(&mut self) -> Option<Direction> {
        let net = self.displacement();
        let was_dragging = self.is_dragging();
        self.gesture = Gesture::Idle;
        if !was_dragging {
            return None;
        }

        if net > self.threshold {
            Some(Direction::Next)
        } else if -net > self.threshold {
            Some(Direction::Prev)
        } else {
            None
        }
    }

    /// Abandon the gesture without navigating, e.g. when the pointer leaves the window.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }
}
