//! Draw-session state machine.
//!
//! A session is `Idle` until a pointer-down arrives while a draw tool is
//! armed. It then holds a single draft shape, sized from the pointer delta
//! on every move, until pointer-up commits or discards it. Tools are
//! single-shot: the armed tool is cleared once a gesture ends, so the user
//! re-arms it for the next shape.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Rect | Ellipse | Others |
//! |----------|------|---------|--------|
//! | **Shift** | Square constraint | Circle constraint | — |

use crate::engine::BoardMutation;
use crate::input::{InputEvent, Modifiers};
use smallvec::smallvec;
use std::fmt;
use std::str::FromStr;
use wb_core::model::{Color, Shape, ShapeKind};
use wb_core::{EditorConfig, Point};

/// The shape kind a draw gesture produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    Rect,
    Ellipse,
    Triangle,
    Line,
    Pen,
    Text,
}

impl DrawTool {
    pub const ALL: [DrawTool; 6] = [
        DrawTool::Rect,
        DrawTool::Ellipse,
        DrawTool::Triangle,
        DrawTool::Line,
        DrawTool::Pen,
        DrawTool::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DrawTool::Rect => "rect",
            DrawTool::Ellipse => "ellipse",
            DrawTool::Triangle => "triangle",
            DrawTool::Line => "line",
            DrawTool::Pen => "pen",
            DrawTool::Text => "text",
        }
    }
}

impl fmt::Display for DrawTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawTool::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown draw tool: {s:?}"))
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Drafting(DrawTool),
}

/// The in-progress shape and the pointer position it was anchored at.
#[derive(Debug, Clone)]
struct Draft {
    tool: DrawTool,
    anchor: Point,
    shape: Shape,
}

#[derive(Debug, Default)]
pub struct DrawSession {
    armed: Option<DrawTool>,
    draft: Option<Draft>,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a tool for the next gesture.
    pub fn arm(&mut self, tool: DrawTool) {
        log::debug!("arm {tool}");
        self.armed = Some(tool);
    }

    /// Disarm without touching an in-progress draft.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn armed(&self) -> Option<DrawTool> {
        self.armed
    }

    pub fn state(&self) -> SessionState {
        match &self.draft {
            Some(d) => SessionState::Drafting(d.tool),
            None => SessionState::Idle,
        }
    }

    /// The draft shape, for rendering while the pointer is held.
    pub fn draft(&self) -> Option<&Shape> {
        self.draft.as_ref().map(|d| &d.shape)
    }

    /// Drop any draft and disarm.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.armed = None;
    }

    /// Feed a pointer event. Returns the mutations to apply to the board:
    /// at most one `AddShape`, on pointer-up of a valid draft.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        color: Color,
        config: &EditorConfig,
    ) -> Vec<BoardMutation> {
        match event {
            InputEvent::PointerDown { pos, .. } => {
                let (Some(tool), Some(anchor), None) = (self.armed, *pos, &self.draft) else {
                    return vec![];
                };
                let shape = start_draft(tool, anchor, color, config);
                log::debug!("drafting {tool} at ({}, {})", anchor.x, anchor.y);
                self.draft = Some(Draft {
                    tool,
                    anchor,
                    shape,
                });
                vec![]
            }
            InputEvent::PointerMove { pos, modifiers } => {
                if let (Some(draft), Some(pos)) = (&mut self.draft, *pos) {
                    log::trace!("draft move ({}, {})", pos.x, pos.y);
                    update_draft(draft, pos, *modifiers, config);
                }
                vec![]
            }
            InputEvent::PointerUp { .. } => {
                let Some(draft) = self.draft.take() else {
                    return vec![];
                };
                self.armed = None;
                if draft.shape.is_degenerate() {
                    log::debug!("discard degenerate {}", draft.tool);
                    vec![]
                } else {
                    log::debug!("commit {} {}", draft.tool, draft.shape.id);
                    vec![BoardMutation::AddShape {
                        shape: Box::new(draft.shape),
                    }]
                }
            }
            InputEvent::Key { .. } => vec![],
        }
    }
}

/// A zero-extent draft of `tool` at `anchor`.
fn start_draft(tool: DrawTool, anchor: Point, color: Color, config: &EditorConfig) -> Shape {
    let kind = match tool {
        DrawTool::Rect => ShapeKind::Rect {
            width: 0.0,
            height: 0.0,
        },
        DrawTool::Ellipse => ShapeKind::Ellipse {
            radius_x: 0.0,
            radius_y: 0.0,
        },
        DrawTool::Triangle => ShapeKind::Triangle { radius: 0.0 },
        DrawTool::Line => ShapeKind::Line {
            points: smallvec![0.0, 0.0, 0.0, 0.0],
            stroke_width: config.stroke_width,
        },
        DrawTool::Pen => ShapeKind::Pen {
            points: smallvec![0.0, 0.0],
            stroke_width: config.stroke_width,
        },
        DrawTool::Text => ShapeKind::Text {
            width: config.text_width,
            height: config.text_height,
            text: config.default_text.clone(),
            font_size: config.font_size,
        },
    };
    Shape::new(kind, anchor.x, anchor.y, color)
}

fn update_draft(draft: &mut Draft, pos: Point, modifiers: Modifiers, config: &EditorConfig) {
    let (dx, dy) = pos.delta_from(draft.anchor);
    let constrain = modifiers.constrain();
    match &mut draft.shape.kind {
        ShapeKind::Rect { width, height } => drag_rect(width, height, dx, dy, constrain),
        ShapeKind::Ellipse { radius_x, radius_y } => {
            drag_ellipse(radius_x, radius_y, dx, dy, constrain)
        }
        ShapeKind::Triangle { radius } => *radius = dx.max(dy) * config.triangle_fit,
        ShapeKind::Line { points, .. } => {
            *points = smallvec![0.0, 0.0, dx, dy];
        }
        ShapeKind::Pen { points, .. } => {
            points.push(dx);
            points.push(dy);
        }
        ShapeKind::Text { .. } => {}
    }
}

/// Shift: both sides become the shorter delta, each keeping its own sign.
fn drag_rect(width: &mut f32, height: &mut f32, dx: f32, dy: f32, constrain: bool) {
    if constrain {
        let side = dx.abs().min(dy.abs());
        *width = side.copysign(dx);
        *height = side.copysign(dy);
    } else {
        *width = dx;
        *height = dy;
    }
}

/// Shift: equal radii, the shorter delta.
fn drag_ellipse(radius_x: &mut f32, radius_y: &mut f32, dx: f32, dy: f32, constrain: bool) {
    let (rx, ry) = (dx.abs(), dy.abs());
    if constrain {
        let r = rx.min(ry);
        *radius_x = r;
        *radius_y = r;
    } else {
        *radius_x = rx;
        *radius_y = ry;
    }
}
