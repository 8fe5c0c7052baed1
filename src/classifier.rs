//! Open/closed hand classification from a single landmark set.

use crate::types::{GestureLabel, LandmarkSet, FINGER_TIP_PIP};

/// Fingers that must be extended for the hand to count as open (of 4).
pub const OPEN_FINGER_MIN: usize = 3;

/// Number of fingers whose tip is above its PIP joint.
///
/// Image y grows downward, so "above" is a strictly smaller y. Assumes an
/// upright hand facing the camera.
pub fn count_extended(hand: &LandmarkSet) -> usize {
    FINGER_TIP_PIP
        .iter()
        .filter(|&&(tip, pip)| hand.point(tip).y < hand.point(pip).y)
        .count()
}

pub fn classify(hand: &LandmarkSet) -> GestureLabel {
    if count_extended(hand) >= OPEN_FINGER_MIN {
        GestureLabel::Open
    } else {
        GestureLabel::Closed
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Point3D, LANDMARK_COUNT};

    /// Hand with the first `extended` fingers (index, middle, ring, pinky) raised.
    pub(crate) fn hand_with_extended(extended: usize, wrist: (f32, f32)) -> LandmarkSet {
        let mut points = [Point3D::new(wrist.0, wrist.1, 0.0); LANDMARK_COUNT];
        for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
            points[pip].y = 0.5;
            points[tip].y = if i < extended { 0.3 } else { 0.6 };
        }
        LandmarkSet::new(points)
    }

    #[test]
    fn test_all_fingers_extended_is_open() {
        let hand = hand_with_extended(4, (0.5, 0.8));
        assert_eq!(count_extended(&hand), 4);
        assert_eq!(classify(&hand), GestureLabel::Open);
    }

    #[test]
    fn test_three_of_four_is_open() {
        assert_eq!(classify(&hand_with_extended(3, (0.5, 0.8))), GestureLabel::Open);
    }

    #[test]
    fn test_two_of_four_is_closed() {
        assert_eq!(classify(&hand_with_extended(2, (0.5, 0.8))), GestureLabel::Closed);
        assert_eq!(classify(&hand_with_extended(0, (0.5, 0.8))), GestureLabel::Closed);
    }

    #[test]
    fn test_tip_level_with_pip_is_not_extended() {
        let mut points = *hand_with_extended(4, (0.5, 0.8)).points();
        // Pull two tips down to exactly the knuckle height.
        for &(tip, pip) in &FINGER_TIP_PIP[..2] {
            points[tip].y = points[pip].y;
        }
        let hand = LandmarkSet::new(points);
        assert_eq!(count_extended(&hand), 2);
        assert_eq!(classify(&hand), GestureLabel::Closed);
    }

    #[test]
    fn test_thumb_is_ignored() {
        let mut points = *hand_with_extended(2, (0.5, 0.8)).points();
        points[crate::types::THUMB_TIP].y = 0.0;
        assert_eq!(classify(&LandmarkSet::new(points)), GestureLabel::Closed);
    }
}
