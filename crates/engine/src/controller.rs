use serde::{Deserialize, Serialize};

use crate::{SNAP_STEP, Scene, snap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What the host saw since the previous frame.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FrameInput {
    pub pointer: (i32, i32),
    /// Whether the primary (left) button is held right now.
    pub primary_down: bool,
    /// Discrete clicks since the last frame, in arrival order.
    pub clicks: Vec<MouseButton>,
}

/// The grabbed rect and where inside it the pointer grabbed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub index: usize,
    pub grab_dx: i32,
    pub grab_dy: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOutcome {
    /// Topmost rect under the pointer before this frame's move.
    pub hovered: Option<usize>,
    /// Rect to draw highlighted: the dragged one, else the hovered one.
    pub highlighted: Option<usize>,
}

/// Per-frame drag/rotate state machine. The scene is passed in on every
/// tick; the controller only remembers the drag and last frame's button.
#[derive(Debug, Default, Clone)]
pub struct Controller {
    state: DragState,
    primary_was_down: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn tick(&mut self, scene: &mut Scene, input: &FrameInput) -> FrameOutcome {
        let (px, py) = input.pointer;
        let hovered = scene.hit_test(px, py);

        if !self.primary_was_down && input.primary_down {
            self.state = self.grab(scene, hovered, px, py);
        }
        if !input.primary_down {
            self.state = DragState::Idle;
        }

        if let DragState::Dragging(session) = self.state {
            self.drag(scene, session, input);
        }

        self.primary_was_down = input.primary_down;

        let highlighted = match self.state {
            DragState::Dragging(session) => Some(session.index),
            DragState::Idle => hovered,
        };
        FrameOutcome {
            hovered,
            highlighted,
        }
    }

    fn grab(&self, scene: &Scene, hit: Option<usize>, px: i32, py: i32) -> DragState {
        let Some(index) = hit else {
            return DragState::Idle;
        };
        let Some(rect) = scene.get(index) else {
            return DragState::Idle;
        };
        tracing::debug!(index, "grabbed rect");
        DragState::Dragging(DragSession {
            index,
            grab_dx: px.wrapping_sub(rect.x),
            grab_dy: py.wrapping_sub(rect.y),
        })
    }

    fn drag(&self, scene: &mut Scene, session: DragSession, input: &FrameInput) {
        let Some(rect) = scene.get_mut(session.index) else {
            return;
        };
        let (px, py) = input.pointer;
        rect.x = snap(px.wrapping_sub(session.grab_dx), SNAP_STEP);
        rect.y = snap(py.wrapping_sub(session.grab_dy), SNAP_STEP);

        for click in &input.clicks {
            if *click == MouseButton::Right {
                rect.rotate();
            }
        }
    }
}
