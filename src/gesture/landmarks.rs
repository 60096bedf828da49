//! Hand landmark frames and the finger-pose helpers built on them.
//!
//! Landmarks follow the 21-point hand topology used by common hand trackers:
//! the wrist, then four joints for each finger from thumb to pinky. Image
//! coordinates, so a smaller `y` is higher on screen.

use bitflags::bitflags;
use serde::Deserialize;

use super::error::LandmarkError;
use crate::game::Position;

/// Number of landmarks in one hand
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

bitflags! {
    /// Set of raised fingers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Fingers: u8 {
        const THUMB = 1;
        const INDEX = 1 << 1;
        const MIDDLE = 1 << 2;
        const RING = 1 << 3;
        const PINKY = 1 << 4;
    }
}

/// (tip, pip, flag) for the fingers that extend vertically
const VERTICAL_FINGERS: [(usize, usize, Fingers); 4] = [
    (INDEX_TIP, INDEX_PIP, Fingers::INDEX),
    (MIDDLE_TIP, MIDDLE_PIP, Fingers::MIDDLE),
    (RING_TIP, RING_PIP, Fingers::RING),
    (PINKY_TIP, PINKY_PIP, Fingers::PINKY),
];

/// One validated hand: exactly [`LANDMARK_COUNT`] points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandLandmarks {
    points: [Position; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Reference point fed to the swipe classifier
    pub fn index_tip(&self) -> Position {
        self.points[INDEX_TIP]
    }

    /// Parse one JSON frame: `{"landmarks": [[x, y], ...]}`.
    ///
    /// A missing or `null` `landmarks` field means no hand in this frame.
    pub fn parse_frame(json: &str) -> Result<Option<Self>, LandmarkError> {
        let frame: RawFrame = serde_json::from_str(json)?;
        frame
            .landmarks
            .map(|points| {
                let points: Vec<Position> =
                    points.into_iter().map(|[x, y]| Position::new(x, y)).collect();
                Self::try_from(points)
            })
            .transpose()
    }
}

impl TryFrom<Vec<Position>> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Position>) -> Result<Self, Self::Error> {
        let found = points.len();
        let points = points.try_into().map_err(|_| LandmarkError::WrongCount {
            expected: LANDMARK_COUNT,
            found,
        })?;
        Ok(Self { points })
    }
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    landmarks: Option<Vec<[i32; 2]>>,
}

/// Which fingers are extended in this frame.
///
/// The four fingers count as up when the tip is above its PIP joint; the
/// thumb extends sideways, so it compares the tip and IP joint horizontally.
pub fn fingers_up(hand: &HandLandmarks) -> Fingers {
    let mut fingers = Fingers::empty();

    if hand.points[THUMB_TIP].x < hand.points[THUMB_IP].x {
        fingers |= Fingers::THUMB;
    }

    for (tip, pip, flag) in VERTICAL_FINGERS {
        if hand.points[tip].y < hand.points[pip].y {
            fingers |= flag;
        }
    }

    fingers
}

/// A fist is a hand with no finger up
pub fn is_fist(hand: &HandLandmarks) -> bool {
    fingers_up(hand).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every landmark at (100, 100): no finger compares as raised
    fn flat_hand() -> Vec<Position> {
        vec![Position::new(100, 100); LANDMARK_COUNT]
    }

    fn hand(points: Vec<Position>) -> HandLandmarks {
        HandLandmarks::try_from(points).unwrap()
    }

    #[test]
    fn test_wrong_count_rejected() {
        let err = HandLandmarks::try_from(vec![Position::new(0, 0); 5]).unwrap_err();
        assert!(matches!(
            err,
            LandmarkError::WrongCount {
                expected: 21,
                found: 5
            }
        ));
        assert_eq!(err.to_string(), "expected 21 landmarks, found 5");
    }

    #[test]
    fn test_flat_hand_is_fist() {
        let hand = hand(flat_hand());
        assert_eq!(fingers_up(&hand), Fingers::empty());
        assert!(is_fist(&hand));
    }

    #[test]
    fn test_raised_fingers() {
        let mut points = flat_hand();
        points[INDEX_TIP] = Position::new(100, 40);
        points[PINKY_TIP] = Position::new(100, 60);
        // Tip below its joint stays down
        points[MIDDLE_TIP] = Position::new(100, 160);

        let hand = hand(points);
        assert_eq!(fingers_up(&hand), Fingers::INDEX | Fingers::PINKY);
        assert!(!is_fist(&hand));
    }

    #[test]
    fn test_thumb_compares_horizontally() {
        let mut points = flat_hand();
        points[THUMB_TIP] = Position::new(60, 100);
        assert_eq!(fingers_up(&hand(points.clone())), Fingers::THUMB);

        // Vertical travel alone does not raise the thumb
        points[THUMB_TIP] = Position::new(100, 10);
        assert_eq!(fingers_up(&hand(points)), Fingers::empty());
    }

    #[test]
    fn test_index_tip_reference_point() {
        let mut points = flat_hand();
        points[INDEX_TIP] = Position::new(321, 123);
        points[INDEX_PIP] = Position::new(300, 400);
        let hand = hand(points);
        assert_eq!(hand.index_tip(), Position::new(321, 123));
    }

    #[test]
    fn test_parse_frame() {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| format!("[{}, {}]", i * 10, 200 - i as i32))
            .collect();
        let json = format!("{{\"landmarks\": [{}]}}", points.join(","));

        let hand = HandLandmarks::parse_frame(&json).unwrap().unwrap();
        assert_eq!(hand.index_tip(), Position::new(80, 192));

        assert_eq!(HandLandmarks::parse_frame("{}").unwrap(), None);
        assert_eq!(
            HandLandmarks::parse_frame("{\"landmarks\": null}").unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_frame_errors() {
        assert!(matches!(
            HandLandmarks::parse_frame("{\"landmarks\": [[1, 2]]}"),
            Err(LandmarkError::WrongCount { found: 1, .. })
        ));
        assert!(matches!(
            HandLandmarks::parse_frame("not json"),
            Err(LandmarkError::Json(_))
        ));
    }
}
