//! Axis-aligned bounding boxes and overlap testing
//!
//! Field coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vertical_overlap_hits() {
        // Block sits 10px into the top of the player
        let player = Rect::new(385.0, 570.0, 30.0, 30.0);
        let block = Rect::new(385.0, 560.0, 30.0, 30.0);
        assert!(player.overlaps(&block));

        let block = Rect::new(385.0, 600.0, 30.0, 30.0);
        assert!(!player.overlaps(&block));
    }

    #[test]
    fn test_edge_touch_is_not_a_hit() {
        let player = Rect::new(100.0, 100.0, 30.0, 30.0);

        // Touching on each side
        assert!(!player.overlaps(&Rect::new(130.0, 100.0, 30.0, 30.0)));
        assert!(!player.overlaps(&Rect::new(70.0, 100.0, 30.0, 30.0)));
        assert!(!player.overlaps(&Rect::new(100.0, 130.0, 30.0, 30.0)));
        assert!(!player.overlaps(&Rect::new(100.0, 70.0, 30.0, 30.0)));

        // One pixel further in
        assert!(player.overlaps(&Rect::new(129.0, 100.0, 30.0, 30.0)));
        assert!(player.overlaps(&Rect::new(100.0, 71.0, 30.0, 30.0)));
    }

    #[test]
    fn test_contained_rect_hits() {
        let outer = Rect::new(0.0, 0.0, 120.0, 20.0);
        let inner = Rect::new(50.0, 5.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f32..900.0, -100.0f32..700.0, 1.0f32..150.0, 1.0f32..150.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in rect_strategy()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
