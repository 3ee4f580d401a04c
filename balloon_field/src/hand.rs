//! Hand landmarks and the pinch gesture.
//!
//! Landmarks follow the 21-point hand model used by common landmark
//! detectors: coordinates are normalized to `[0, 1]` of the (mirrored)
//! camera image, `z` is relative depth and ignored here.

use crate::geometry::{Field, Point};

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// Thumb-to-index distance (normalized units) below which the hand pinches.
/// Compared in `f64`; `0.04_f32` sits just under 0.04.
pub const PINCH_THRESHOLD: f64 = 0.04;

// ════════════════════════════════════════════════════════════════════════════
// Landmark / HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    /// Planar distance in `f64`, `z` is not considered.
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        dx.hypot(dy)
    }
}

/// All landmarks of one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks { landmarks }
    }

    /// A hand with every landmark at the origin except the two fingertips
    /// the game looks at. Used by simulated sources.
    pub fn from_tips(thumb: Landmark, index: Landmark) -> Self {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[THUMB_TIP] = thumb;
        landmarks[INDEX_TIP] = index;
        HandLandmarks { landmarks }
    }

    pub fn thumb_tip(&self) -> &Landmark { &self.landmarks[THUMB_TIP] }
    pub fn index_tip(&self) -> &Landmark { &self.landmarks[INDEX_TIP] }

    /// Flip horizontally, for frames that were not mirrored before
    /// inference.
    pub fn mirrored(mut self) -> Self {
        for lm in self.landmarks.iter_mut() {
            lm.x = 1.0 - lm.x;
        }
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pinch / Gesture
// ════════════════════════════════════════════════════════════════════════════

/// True when the two tips are closer than [`PINCH_THRESHOLD`].
pub fn is_pinch(thumb: &Landmark, index: &Landmark) -> bool {
    thumb.distance_2d(index) < PINCH_THRESHOLD
}

/// What the game takes from one hand in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    /// Index fingertip projected onto the field, whole pixels.
    pub pointer: Point,
    pub pinch:   bool,
}

impl Gesture {
    pub fn from_hand(hand: &HandLandmarks, field: Field) -> Self {
        let tip = hand.index_tip();
        let pointer = Point::new(
            (tip.x * field.width as f32).trunc(),
            (tip.y * field.height as f32).trunc(),
        );
        Gesture {
            pointer,
            pinch: is_pinch(hand.thumb_tip(), tip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_below_threshold() {
        let thumb = Landmark::new(0.50, 0.50);
        assert!(is_pinch(&thumb, &Landmark::new(0.52, 0.50)));
        assert!(is_pinch(&thumb, &Landmark::new(0.50, 0.50)));
    }

    #[test]
    fn no_pinch_at_or_above_threshold() {
        let thumb = Landmark::new(0.0, 0.0);
        assert!(!is_pinch(&thumb, &Landmark::new(0.03, 0.04))); // exactly 0.05
        assert!(!is_pinch(&thumb, &Landmark::new(0.5, 0.5)));
    }

    #[test]
    fn pinch_boundary_uses_full_precision() {
        // These f32 tips are 0.0399999991 apart: under 0.04, so a pinch.
        let thumb = Landmark::new(0.10, 0.0);
        let index = Landmark::new(0.14, 0.0);
        let exact = index.x as f64 - thumb.x as f64;
        assert!(exact < 0.04 && exact >= 0.04_f32 as f64);
        assert!(is_pinch(&thumb, &index));
        assert!(is_pinch(&index, &thumb));
    }

    #[test]
    fn no_pinch_just_past_threshold() {
        let thumb = Landmark::new(0.0, 0.0);
        assert!(!is_pinch(&thumb, &Landmark::new(0.0401, 0.0)));
    }

    #[test]
    fn pinch_ignores_depth() {
        let thumb = Landmark { x: 0.3, y: 0.3, z: 0.0 };
        let index = Landmark { x: 0.3, y: 0.3, z: 0.9 };
        assert!(is_pinch(&thumb, &index));
    }

    #[test]
    fn pointer_projects_index_tip() {
        let hand = HandLandmarks::from_tips(Landmark::new(0.1, 0.1), Landmark::new(0.5, 0.5));
        let g = Gesture::from_hand(&hand, Field::new(1280, 720));
        assert_eq!(g.pointer, Point::new(640.0, 360.0));
        assert!(!g.pinch);
    }

    #[test]
    fn pointer_truncates_to_whole_pixels() {
        let hand = HandLandmarks::from_tips(Landmark::new(0.0, 0.0), Landmark::new(0.2501, 0.9999));
        let g = Gesture::from_hand(&hand, Field::new(1000, 100));
        assert_eq!(g.pointer, Point::new(250.0, 99.0));
    }

    #[test]
    fn mirrored_flips_x_only() {
        let hand = HandLandmarks::from_tips(Landmark::new(0.25, 0.4), Landmark::new(0.75, 0.6))
            .mirrored();
        assert!((hand.thumb_tip().x - 0.75).abs() < 1e-6);
        assert!((hand.index_tip().x - 0.25).abs() < 1e-6);
        assert_eq!(hand.index_tip().y, 0.6);
    }
}
