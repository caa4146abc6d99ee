use crate::deck::Tuning;

/// Opacity of the nearest non-active card; each further card loses [`OPACITY_STEP`].
const BASE_OPACITY: f32 = 0.8;
const OPACITY_STEP: f32 = 0.1;

/// Stack geometry constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackParams {
    pub y_offset: f32,
    pub scale_step: f32,
    pub min_scale: f32,
}

impl From<&Tuning> for StackParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            y_offset: tuning.y_offset,
            scale_step: tuning.scale_step,
            min_scale: tuning.min_scale,
        }
    }
}

impl Default for StackParams {
    fn default() -> Self {
        StackParams::from(&Tuning::default())
    }
}

/// Visual state of one card. `offset_y` is in logical pixels, positive is down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub depth: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub opacity: f32,
    pub interactive: bool,
}

impl CardTransform {
    /// Transform for a card `distance` steps from the active one.
    ///
    /// Cards ahead (`distance > 0`) stack upward, cards behind stack downward.
    pub fn at_distance(distance: isize, len: usize, params: &StackParams) -> Self {
        let abs = distance.unsigned_abs();
        let steps = abs as f32;
        let magnitude = steps * params.y_offset;
        let offset_y = match distance.signum() {
            -1 => magnitude,
            1 => -magnitude,
            _ => 0.0,
        };
        let opacity = if abs == 0 {
            1.0
        } else {
            (BASE_OPACITY - steps * OPACITY_STEP).clamp(0.0, 1.0)
        };

        Self {
            depth: len.saturating_sub(abs) as f32,
            offset_y,
            scale: (1.0 - steps * params.scale_step).max(params.min_scale),
            opacity,
            interactive: abs == 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.001
    }
}

/// Signed shortest wrap-around offset from `current` to `index`.
///
/// Ties on even-length decks resolve to the positive side.
pub fn signed_wrap_distance(index: usize, current: usize, len: usize) -> isize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let d = (index as isize - current as isize).rem_euclid(len);
    if d > len / 2 { d - len } else { d }
}

/// Transforms for every card with `current` active.
pub fn layout(current: usize, len: usize, params: &StackParams) -> Vec<CardTransform> {
    (0..len)
        .map(|i| CardTransform::at_distance(signed_wrap_distance(i, current, len), len, params))
        .collect()
}

/// The resting stack shown on load: every card's own index is its distance,
/// so the pile always grows upward from the first card.
pub fn initial_layout(len: usize, params: &StackParams) -> Vec<CardTransform> {
    (0..len)
        .map(|i| CardTransform::at_distance(i as isize, len, params))
        .collect()
}

/// Card indices sorted back to front.
pub fn paint_order(transforms: &[CardTransform]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..transforms.len()).collect();
    order.sort_by(|&a, &b| transforms[a].depth.total_cmp(&transforms[b].depth));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> StackParams {
        StackParams {
            y_offset: 25.0,
            scale_step: 0.05,
            min_scale: 0.1,
        }
    }

    #[test]
    fn test_active_card() {
        let t = CardTransform::at_distance(0, 5, &params());
        assert_eq!(t.depth, 5.0);
        assert_eq!(t.offset_y, 0.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.opacity, 1.0);
        assert!(t.interactive);
    }

    #[test]
    fn test_ahead_goes_up_behind_goes_down() {
        let ahead = CardTransform::at_distance(2, 5, &params());
        let behind = CardTransform::at_distance(-2, 5, &params());
        assert_eq!(ahead.offset_y, -50.0);
        assert_eq!(behind.offset_y, 50.0);
        assert!(!ahead.interactive && !behind.interactive);
    }

    #[test]
    fn test_symmetry() {
        for d in 1..6 {
            let ahead = CardTransform::at_distance(d, 12, &params());
            let behind = CardTransform::at_distance(-d, 12, &params());
            assert_eq!(ahead.scale, behind.scale);
            assert_eq!(ahead.opacity, behind.opacity);
            assert_eq!(ahead.depth, behind.depth);
            assert_eq!(ahead.offset_y.abs(), behind.offset_y.abs());
            assert_eq!(ahead.offset_y, -behind.offset_y);
        }
    }

    #[test]
    fn test_opacity_steps_down_from_base() {
        let one = CardTransform::at_distance(1, 5, &params());
        let two = CardTransform::at_distance(2, 5, &params());
        assert!((one.opacity - 0.7).abs() < 1e-6);
        assert!((two.opacity - 0.6).abs() < 1e-6);
        assert!((one.scale - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_far_cards_are_clamped() {
        let far = CardTransform::at_distance(30, 60, &params());
        assert_eq!(far.opacity, 0.0);
        assert_eq!(far.scale, 0.1);
        assert!(!far.is_visible());
        assert_eq!(far.depth, 30.0);
    }

    #[test]
    fn test_signed_wrap_distance() {
        assert_eq!(signed_wrap_distance(0, 0, 5), 0);
        assert_eq!(signed_wrap_distance(1, 0, 5), 1);
        assert_eq!(signed_wrap_distance(4, 0, 5), -1);
        assert_eq!(signed_wrap_distance(0, 4, 5), 1);
        assert_eq!(signed_wrap_distance(2, 4, 5), -2);
        // Even length: the opposite card is counted as ahead.
        assert_eq!(signed_wrap_distance(2, 0, 4), 2);
        assert_eq!(signed_wrap_distance(0, 0, 1), 0);
    }

    #[test]
    fn test_layout_has_one_interactive_card() {
        let cards = layout(3, 6, &params());
        let active: Vec<usize> = cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.interactive)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![3]);
        assert_eq!(paint_order(&cards).last(), Some(&3));
    }

    #[test]
    fn test_initial_layout_anchored_at_first_card() {
        let cards = initial_layout(4, &params());
        assert!(cards[0].interactive);
        assert_eq!(cards[3].offset_y, -75.0);
        assert!(cards.iter().all(|c| c.offset_y <= 0.0));
        assert_eq!(paint_order(&cards), vec![3, 2, 1, 0]);
    }
}
