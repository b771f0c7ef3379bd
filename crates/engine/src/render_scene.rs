use serde::{Deserialize, Serialize};

use crate::Scene;

const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const FILL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const OUTLINE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const HIGHLIGHT: [f32; 4] = [0.0, 0.39, 0.0, 1.0];
const OUTLINE_PX: f32 = 1.0;

/// Flat draw list in window pixels, painted in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderScene {
    pub clear_color: [f32; 4],
    pub rects: Vec<RectInstance>,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RectInstance {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RenderScene {
    /// White tiles with gray borders, then the highlighted tile painted over
    /// in dark green.
    pub fn build(scene: &Scene, highlighted: Option<usize>) -> Self {
        let mut rects = Vec::with_capacity(scene.len() * 5 + 1);
        for r in scene.rects() {
            let (x, y, w, h) = (r.x as f32, r.y as f32, r.w as f32, r.h as f32);
            rects.push(RectInstance {
                pos: [x, y],
                size: [w, h],
                color: FILL,
            });
            push_outline(&mut rects, x, y, w, h);
        }

        if let Some(r) = highlighted.and_then(|i| scene.get(i)) {
            rects.push(RectInstance {
                pos: [r.x as f32, r.y as f32],
                size: [r.w as f32, r.h as f32],
                color: HIGHLIGHT,
            });
        }

        Self {
            clear_color: CLEAR,
            rects,
        }
    }
}

fn push_outline(rects: &mut Vec<RectInstance>, x: f32, y: f32, w: f32, h: f32) {
    let t = OUTLINE_PX;
    // top, bottom, left, right
    for (pos, size) in [
        ([x, y], [w, t]),
        ([x, y + h - t], [w, t]),
        ([x, y], [t, h]),
        ([x + w - t, y], [t, h]),
    ] {
        rects.push(RectInstance {
            pos,
            size,
            color: OUTLINE,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Rect;

    #[test]
    fn every_rect_gets_fill_and_four_outline_strips() {
        let scene = Scene::new(vec![Rect::new(0, 0, 10, 10), Rect::new(20, 0, 5, 8)]);
        let out = RenderScene::build(&scene, None);

        assert_eq!(out.rects.len(), 10);
        assert_eq!(out.rects[0].color, FILL);
        assert!(out.rects[1..5].iter().all(|r| r.color == OUTLINE));
        assert_eq!(out.rects[5].pos, [20.0, 0.0]);
        assert_eq!(out.rects[5].size, [5.0, 8.0]);
    }

    #[test]
    fn highlight_is_drawn_last() {
        let scene = Scene::default_layout();
        let out = RenderScene::build(&scene, Some(3));

        assert_eq!(out.rects.len(), scene.len() * 5 + 1);
        let last = out.rects.last().copied().expect("highlight");
        assert_eq!(last.color, HIGHLIGHT);
        assert_eq!(last.pos, [300.0, 150.0]);
        assert_eq!(last.size, [50.0, 50.0]);
    }

    #[test]
    fn stale_highlight_index_is_ignored() {
        let scene = Scene::new(vec![Rect::new(0, 0, 10, 10)]);
        let out = RenderScene::build(&scene, Some(7));
        assert_eq!(out.rects.len(), 5);
    }
}
