//! Swipe classification of a tracked reference point.
//!
//! Each observation is compared with the one before it; a displacement larger
//! than the movement threshold on the dominant axis becomes a direction, and
//! anything smaller is treated as tremor. Between swipes the last emitted
//! direction is held.

use serde::{Deserialize, Serialize};

use crate::game::{Direction, Position};

/// Thresholds for the swipe classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Largest per-frame displacement (in sample units, usually pixels)
    /// still treated as noise
    pub movement_threshold: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 30,
        }
    }
}

impl ClassifierConfig {
    pub fn new(movement_threshold: u32) -> Self {
        Self { movement_threshold }
    }
}

/// Turns a stream of reference-point samples into a debounced direction.
#[derive(Debug, Clone)]
pub struct DirectionClassifier {
    config: ClassifierConfig,
    /// Sample from the previous frame that had a hand in it
    previous_position: Option<Position>,
    /// Last confident swipe
    last_direction: Option<Direction>,
}

impl DirectionClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            previous_position: None,
            last_direction: None,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Last direction emitted, if any swipe has been seen yet
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Feed one frame. `None` means no hand was detected in this frame.
    ///
    /// Returns the held direction: the last swipe seen, whether or not this
    /// frame produced one.
    pub fn observe(&mut self, sample: Option<Position>) -> Option<Direction> {
        self.next_swipe(sample);
        self.last_direction
    }

    /// Feed one frame and return a direction only when this frame is a swipe.
    ///
    /// Absent hands, the first sample and sub-threshold motion all yield
    /// `None`; the held direction is still available from
    /// [`last_direction`](Self::last_direction).
    pub fn next_swipe(&mut self, sample: Option<Position>) -> Option<Direction> {
        let current = sample?;
        let previous = self.previous_position.replace(current)?;

        let (dx, dy) = current.offset_from(previous);
        let threshold = u64::from(self.config.movement_threshold);
        if dx.unsigned_abs().max(dy.unsigned_abs()) <= threshold {
            return None;
        }

        let direction = classify_swipe(dx, dy);
        if self.last_direction != Some(direction) {
            log::debug!("swipe ({dx}, {dy}) -> {direction}");
        }
        self.last_direction = Some(direction);
        Some(direction)
    }
}

/// Dominant-axis classification; equal magnitudes resolve vertically.
fn classify_swipe(dx: i64, dy: i64) -> Direction {
    if dx.unsigned_abs() > dy.unsigned_abs() {
        if dx > 0 { Direction::Right } else { Direction::Left }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primed(at: (i32, i32)) -> DirectionClassifier {
        let mut classifier = DirectionClassifier::new(ClassifierConfig::default());
        assert_eq!(classifier.observe(Some(at.into())), None);
        classifier
    }

    #[test]
    fn test_first_frame_emits_nothing() {
        let mut classifier = DirectionClassifier::new(ClassifierConfig::default());
        assert_eq!(classifier.observe(Some(Position::new(500, 500))), None);
        assert_eq!(classifier.last_direction(), None);
    }

    #[test]
    fn test_missing_hand_before_any_swipe() {
        let mut classifier = DirectionClassifier::new(ClassifierConfig::default());
        assert_eq!(classifier.observe(None), None);
        assert_eq!(classifier.observe(None), None);
    }

    #[test]
    fn test_small_motion_is_debounced() {
        let mut classifier = primed((0, 0));
        assert_eq!(classifier.observe(Some(Position::new(10, 10))), None);

        let mut classifier = primed((0, 0));
        classifier.observe(Some(Position::new(0, 100)));
        assert_eq!(
            classifier.observe(Some(Position::new(10, 110))),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut classifier = primed((0, 0));
        assert_eq!(classifier.observe(Some(Position::new(30, 0))), None);
        assert_eq!(
            classifier.observe(Some(Position::new(61, 0))),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_equal_axes_resolve_vertically() {
        let mut classifier = primed((0, 0));
        assert_eq!(
            classifier.observe(Some(Position::new(40, 40))),
            Some(Direction::Down)
        );

        let mut classifier = primed((0, 0));
        assert_eq!(
            classifier.observe(Some(Position::new(-40, -40))),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_dominant_axis_signs() {
        let cases = [
            ((50, 10), Direction::Right),
            ((-50, 10), Direction::Left),
            ((10, 50), Direction::Down),
            ((10, -50), Direction::Up),
        ];

        for (to, expected) in cases {
            let mut classifier = primed((0, 0));
            assert_eq!(classifier.observe(Some(to.into())), Some(expected));
        }
    }

    #[test]
    fn test_displacement_is_frame_to_frame() {
        // Slow drift never exceeds the threshold between consecutive frames
        let mut classifier = primed((0, 0));
        for x in [20, 40, 60, 80, 100] {
            assert_eq!(classifier.observe(Some(Position::new(x, 0))), None);
        }
    }

    #[test]
    fn test_missing_hand_holds_last_direction() {
        let mut classifier = primed((100, 100));
        classifier.observe(Some(Position::new(40, 100)));
        assert_eq!(classifier.last_direction(), Some(Direction::Left));

        assert_eq!(classifier.observe(None), Some(Direction::Left));
        // The gap does not reset the previous sample
        assert_eq!(
            classifier.observe(Some(Position::new(45, 60))),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_debounce_keeps_previous_swipe() {
        let mut classifier = primed((0, 0));
        classifier.observe(Some(Position::new(0, -80)));
        assert_eq!(
            classifier.observe(Some(Position::new(5, -85))),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_custom_threshold() {
        let mut classifier = DirectionClassifier::new(ClassifierConfig::new(5));
        classifier.observe(Some(Position::new(0, 0)));
        assert_eq!(
            classifier.observe(Some(Position::new(6, 0))),
            Some(Direction::Right)
        );
        assert_eq!(classifier.config().movement_threshold, 5);
    }

    #[test]
    fn test_next_swipe_only_reports_fresh_motion() {
        let mut classifier = primed((0, 0));
        assert_eq!(
            classifier.next_swipe(Some(Position::new(0, -80))),
            Some(Direction::Up)
        );
        // Held, but not emitted again
        assert_eq!(classifier.next_swipe(Some(Position::new(5, -85))), None);
        assert_eq!(classifier.next_swipe(None), None);
        assert_eq!(classifier.last_direction(), Some(Direction::Up));

        // Repeating the same swipe is a fresh emission
        assert_eq!(
            classifier.next_swipe(Some(Position::new(5, -185))),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut classifier = primed((i32::MIN, 0));
        assert_eq!(
            classifier.observe(Some(Position::new(i32::MAX, 0))),
            Some(Direction::Right)
        );
        assert_eq!(
            classifier.observe(Some(Position::new(i32::MIN, 0))),
            Some(Direction::Left)
        );

        let mut classifier = primed((0, i32::MAX));
        assert_eq!(
            classifier.observe(Some(Position::new(0, i32::MIN))),
            Some(Direction::Up)
        );
    }
}
