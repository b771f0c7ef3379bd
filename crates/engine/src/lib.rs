mod codec;
mod controller;
mod render_scene;
mod store;

use serde::{Deserialize, Serialize};

pub use crate::codec::{CodecError, RECORD_LEN, RecordCodec, SceneCodec};
pub use crate::controller::{Controller, DragSession, DragState, FrameInput, FrameOutcome, MouseButton};
pub use crate::render_scene::{RectInstance, RenderScene};
pub use crate::store::{DEFAULT_SAVE_FILE, SceneStore, StoreError};

/// Grid that dragged rectangles snap to, in pixels.
pub const SNAP_STEP: i32 = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        x <= px && px < x + i64::from(self.w) && y <= py && py < y + i64::from(self.h)
    }

    /// Turns the rect by 90 degrees around its origin.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.w, &mut self.h);
    }
}

/// Rounds `v` to a multiple of `step` by adding half a step and truncating.
///
/// Division truncates towards zero, so negative inputs round up rather than
/// to the nearest step: `snap(-13, 5)` is `-10`, not `-15`.
pub fn snap(v: i32, step: i32) -> i32 {
    v.wrapping_add(step / 2).wrapping_div(step).wrapping_mul(step)
}

/// Ordered rectangles. Index order is draw order, so later rects sit on top.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    rects: Vec<Rect>,
}

impl Scene {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// The layout used when nothing was saved yet: a 5x4 grid of squares,
    /// half-width and half-height tiles, two wide tiles and three small
    /// squares off to the right.
    pub fn default_layout() -> Self {
        let mut rects = Vec::with_capacity(33);
        for i in 0..20 {
            rects.push(Rect::new(150 + i % 5 * 50, 150 + i / 5 * 50, 50, 50));
        }
        for i in 0..4 {
            rects.push(Rect::new(400, 150 + i * 50, 25, 50));
            rects.push(Rect::new(150 + i * 50, 400, 50, 25));
        }
        for i in 0..2 {
            rects.push(Rect::new(150 + i * 75, 350, 75, 50));
        }
        for i in 0..3 {
            rects.push(Rect::new(550, 150 + i * 45, 40, 40));
        }
        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.rects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Rect> {
        self.rects.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Index of the topmost rect under the point. On overlap the last match
    /// in draw order wins.
    pub fn hit_test(&self, px: i32, py: i32) -> Option<usize> {
        self.rects.iter().rposition(|r| r.contains(px, py))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_excludes_right_and_bottom_edges() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(14, 14));
        assert!(r.contains(10, 10));
        assert!(!r.contains(15, 14));
        assert!(!r.contains(14, 15));
        assert!(!r.contains(9, 10));
    }

    #[test]
    fn contains_does_not_overflow_near_i32_max() {
        let r = Rect::new(i32::MAX - 1, 0, 10, 10);
        assert!(r.contains(i32::MAX, 5));
    }

    #[test]
    fn rotate_swaps_size_and_keeps_origin() {
        let mut r = Rect::new(3, 4, 25, 50);
        r.rotate();
        assert_eq!(r, Rect::new(3, 4, 50, 25));
    }

    #[test]
    fn snap_adds_half_step_and_truncates() {
        assert_eq!(snap(12, 5), 10);
        assert_eq!(snap(13, 5), 15);
        assert_eq!(snap(15, 5), 15);
        assert_eq!(snap(-3, 5), 0);
        assert_eq!(snap(-13, 5), -10);
        assert_eq!(snap(-18, 5), -15);
    }

    #[test]
    fn default_layout_is_deterministic() {
        let a = Scene::default_layout();
        let b = Scene::default_layout();
        assert_eq!(a, b);
        assert_eq!(a.len(), 33);
    }

    #[test]
    fn default_layout_order_matches_generation() {
        let scene = Scene::default_layout();
        let r = scene.rects();

        assert_eq!(r[0], Rect::new(150, 150, 50, 50));
        assert_eq!(r[4], Rect::new(350, 150, 50, 50));
        assert_eq!(r[5], Rect::new(150, 200, 50, 50));
        assert_eq!(r[19], Rect::new(350, 300, 50, 50));

        // tall and wide tiles alternate
        assert_eq!(r[20], Rect::new(400, 150, 25, 50));
        assert_eq!(r[21], Rect::new(150, 400, 50, 25));
        assert_eq!(r[26], Rect::new(400, 300, 25, 50));
        assert_eq!(r[27], Rect::new(300, 400, 50, 25));
    }

    #[test]
    fn default_layout_tail() {
        let scene = Scene::default_layout();
        let r = scene.rects();
        assert_eq!(r.len(), 33);
        assert_eq!(&r[r.len() - 5..], &[
            Rect::new(150, 350, 75, 50),
            Rect::new(225, 350, 75, 50),
            Rect::new(550, 150, 40, 40),
            Rect::new(550, 195, 40, 40),
            Rect::new(550, 240, 40, 40),
        ]);
    }

    #[test]
    fn hit_test_prefers_later_rect_on_overlap() {
        let scene = Scene::new(vec![Rect::new(0, 0, 20, 20), Rect::new(10, 10, 20, 20)]);
        assert_eq!(scene.hit_test(15, 15), Some(1));
        assert_eq!(scene.hit_test(5, 5), Some(0));
        assert_eq!(scene.hit_test(40, 40), None);
    }
}
