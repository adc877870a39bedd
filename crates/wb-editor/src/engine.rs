//! Editor engine: the explicit application state.
//!
//! The engine owns the board, the selection controller, the draw session,
//! the color swatch, and the configuration. Gesture handlers never write to
//! the board directly. They return `BoardMutation` deltas, and
//! `apply_mutation` is the single place the board changes. After every
//! mutation the selection is revalidated, so it never points at a removed
//! entity.

use crate::input::InputEvent;
use crate::selection::{SelectionController, TransformEnd};
use crate::session::{DrawSession, DrawTool};
use crate::shortcuts::ShortcutAction;
use serde::Serialize;
use wb_core::model::{Color, Image, Shape, ShapeKind};
use wb_core::{Board, EditorConfig, Scale, ShapeId, place_image};

/// A change to the board produced by a gesture handler.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    AddShape { shape: Box<Shape> },
    /// Wholesale replacement at the same paint position.
    ReplaceShape { id: ShapeId, shape: Box<Shape> },
    /// Position-only update for a shape or the image.
    MoveEntity { id: ShapeId, x: f32, y: f32 },
    SetColor { id: ShapeId, color: Color },
    SetText { id: ShapeId, text: String },
    RemoveEntity { id: ShapeId },
    /// Install a new background image, dropping the previous one.
    SetImage { image: Box<Image> },
    UpdateImage { image: Box<Image> },
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene<'a> {
    pub image: Option<&'a Image>,
    pub shapes: &'a [Shape],
    pub draft: Option<&'a Shape>,
    pub selected: Option<ShapeId>,
    pub editing: Option<ShapeId>,
    pub tool: Option<&'static str>,
    pub color: Color,
}

pub struct EditorEngine {
    pub board: Board,
    pub selection: SelectionController,
    pub session: DrawSession,
    /// The color swatch new shapes are drawn with.
    pub color: Color,
    config: EditorConfig,
}

impl Default for EditorEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorEngine {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            board: Board::new(),
            selection: SelectionController::new(),
            session: DrawSession::new(),
            color: config.default_color,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Swap the configuration. The swatch is left alone.
    ///
    /// # Errors
    /// Returns the validation message and keeps the old config.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), String> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ─── Mutation sink ───────────────────────────────────────────────────

    /// Apply one mutation. Returns `true` if the board changed.
    pub fn apply_mutation(&mut self, mutation: BoardMutation) -> bool {
        let changed = match mutation {
            BoardMutation::AddShape { shape } => match self.board.insert(*shape) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("add shape rejected: {e}");
                    false
                }
            },
            BoardMutation::ReplaceShape { id, shape } => self.board.replace_at(id, *shape),
            BoardMutation::MoveEntity { id, x, y } => {
                if let Some(shape) = self.board.get(id) {
                    let moved = Shape {
                        x,
                        y,
                        ..shape.clone()
                    };
                    self.board.replace_at(id, moved)
                } else if let Some(image) = self.board.image().filter(|img| img.id == id) {
                    let moved = Image {
                        x,
                        y,
                        ..image.clone()
                    };
                    self.board.update_image(moved)
                } else {
                    false
                }
            }
            BoardMutation::SetColor { id, color } => match self.board.get(id) {
                Some(shape) => {
                    let repainted = Shape {
                        color,
                        ..shape.clone()
                    };
                    self.board.replace_at(id, repainted)
                }
                None => false,
            },
            BoardMutation::SetText { id, text } => match self.board.get(id).cloned() {
                Some(mut edited) => match &mut edited.kind {
                    ShapeKind::Text { text: content, .. } => {
                        *content = text;
                        self.board.replace_at(id, edited)
                    }
                    _ => false,
                },
                None => false,
            },
            BoardMutation::RemoveEntity { id } => self.board.delete(id),
            BoardMutation::SetImage { image } => {
                if let Some(old) = self.board.set_image(*image) {
                    log::debug!("image {} replaced", old.id);
                }
                true
            }
            BoardMutation::UpdateImage { image } => self.board.update_image(*image),
        };
        self.selection.revalidate(&self.board);
        changed
    }

    /// Apply a batch, returning `true` if any of them changed the board.
    pub fn apply_mutations(&mut self, mutations: Vec<BoardMutation>) -> bool {
        mutations
            .into_iter()
            .fold(false, |changed, m| self.apply_mutation(m) | changed)
    }

    // ─── Pointer gestures ────────────────────────────────────────────────

    /// Arm a draw tool, or disarm with `None` (plain selection mode).
    pub fn arm_tool(&mut self, tool: Option<DrawTool>) {
        match tool {
            Some(t) => self.session.arm(t),
            None => self.session.disarm(),
        }
    }

    /// Pointer pressed over the canvas, `hit` being the entity under it.
    /// Returns `true` if anything visible changed.
    pub fn pointer_down(&mut self, event: &InputEvent, hit: Option<ShapeId>) -> bool {
        if event.position().is_none() {
            return false;
        }
        if self.session.armed().is_some() {
            let deselected = hit.is_none() && self.selection.clear();
            let mutations = self.session.handle(event, self.color, &self.config);
            let changed = self.apply_mutations(mutations);
            deselected || changed || self.session.draft().is_some()
        } else {
            self.selection.click(&self.board, hit)
        }
    }

    pub fn pointer_move(&mut self, event: &InputEvent) -> bool {
        if self.session.draft().is_none() {
            return false;
        }
        let mutations = self.session.handle(event, self.color, &self.config);
        self.apply_mutations(mutations);
        event.position().is_some()
    }

    /// Ends a draw gesture. Returns `true` if a draft was committed or
    /// discarded.
    pub fn pointer_up(&mut self, event: &InputEvent) -> bool {
        if self.session.draft().is_none() {
            return false;
        }
        let mutations = self.session.handle(event, self.color, &self.config);
        self.apply_mutations(mutations);
        true
    }

    // ─── Affordance gestures ─────────────────────────────────────────────

    pub fn drag_end(&mut self, id: ShapeId, x: f32, y: f32) -> bool {
        let mutations = self.selection.drag_end(&self.board, id, x, y);
        self.apply_mutations(mutations)
    }

    /// Live handle feedback. Returns `false` when the box was refused for
    /// shrinking below `min_size`, so the host can revert its handles.
    pub fn transform(&mut self, scale: Scale, rotation: f32) -> bool {
        self.selection
            .transform(&self.board, scale, rotation, self.config.min_size)
    }

    pub fn transform_end(&mut self, end: TransformEnd) -> bool {
        let floor = self.config.size_floor();
        let mutations = self.selection.transform_end(&self.board, end, &floor);
        self.apply_mutations(mutations)
    }

    pub fn double_click(&mut self, hit: Option<ShapeId>) -> bool {
        self.selection.double_click(&self.board, hit)
    }

    pub fn commit_text(&mut self, text: &str) -> bool {
        let mutations = self.selection.commit_text(text);
        self.apply_mutations(mutations)
    }

    /// User picked a swatch color: remember it and repaint the selection.
    pub fn apply_color(&mut self, color: Color) -> bool {
        self.color = color;
        let mutations = self.selection.apply_color(&self.board, color);
        self.apply_mutations(mutations)
    }

    // ─── Deletion & image ────────────────────────────────────────────────

    /// Delete the selected entity. No-op without a selection.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.selected() {
            Some(id) => self.apply_mutation(BoardMutation::RemoveEntity { id }),
            None => false,
        }
    }

    pub fn delete(&mut self, id: ShapeId) -> bool {
        self.apply_mutation(BoardMutation::RemoveEntity { id })
    }

    /// Bitmap decode finished: place the image, replacing any previous one.
    pub fn load_image(&mut self, src: &str, natural_width: f32, natural_height: f32) -> ShapeId {
        let image = place_image(src, natural_width, natural_height, self.config.viewport);
        let id = image.id;
        self.apply_mutation(BoardMutation::SetImage {
            image: Box::new(image),
        });
        id
    }

    // ─── Shortcuts ───────────────────────────────────────────────────────

    /// Dispatch a resolved keyboard shortcut. Returns `true` on change.
    pub fn handle_action(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Arm(tool) => {
                self.session.arm(tool);
                false
            }
            ShortcutAction::ToolSelect => {
                self.session.disarm();
                false
            }
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Deselect => {
                self.session.cancel();
                self.selection.clear()
            }
        }
    }

    // ─── Rendering boundary ──────────────────────────────────────────────

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            image: self.board.image(),
            shapes: self.board.shapes(),
            draft: self.session.draft(),
            selected: self.selection.selected(),
            editing: self.selection.editing(),
            tool: self.session.armed().map(|t| t.name()),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn draw(engine: &mut EditorEngine, tool: DrawTool, from: (f32, f32), to: (f32, f32)) {
        engine.arm_tool(Some(tool));
        engine.pointer_down(
            &InputEvent::pointer_down(from.0, from.1, Modifiers::NONE),
            None,
        );
        engine.pointer_move(&InputEvent::pointer_move(to.0, to.1, Modifiers::NONE));
        engine.pointer_up(&InputEvent::pointer_up(to.0, to.1, Modifiers::NONE));
    }

    #[test]
    fn move_entity_preserves_other_fields() {
        let mut engine = EditorEngine::default();
        draw(&mut engine, DrawTool::Rect, (0.0, 0.0), (30.0, 40.0));
        let before = engine.board.shapes()[0].clone();
        assert!(!engine.drag_end(before.id, 100.0, 200.0), "not selected yet");

        engine.selection.select(&engine.board, before.id);
        assert!(engine.drag_end(before.id, 100.0, 200.0));
        let after = &engine.board.shapes()[0];
        assert_eq!((after.x, after.y), (100.0, 200.0));
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.color, before.color);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn set_text_ignores_non_text_shapes() {
        let mut engine = EditorEngine::default();
        draw(&mut engine, DrawTool::Rect, (0.0, 0.0), (30.0, 40.0));
        let id = engine.board.shapes()[0].id;
        assert!(!engine.apply_mutation(BoardMutation::SetText {
            id,
            text: "x".into()
        }));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut engine = EditorEngine::default();
        draw(&mut engine, DrawTool::Rect, (0.0, 0.0), (30.0, 40.0));
        let shape = engine.board.shapes()[0].clone();
        assert!(!engine.apply_mutation(BoardMutation::AddShape {
            shape: Box::new(shape)
        }));
        assert_eq!(engine.board.len(), 1);
    }

    #[test]
    fn scene_reports_draft_and_tool() {
        let mut engine = EditorEngine::default();
        engine.arm_tool(Some(DrawTool::Ellipse));
        engine.pointer_down(
            &InputEvent::pointer_down(5.0, 5.0, Modifiers::NONE),
            None,
        );
        let scene = engine.scene();
        assert_eq!(scene.tool, Some("ellipse"));
        assert!(scene.draft.is_some());
        assert!(scene.shapes.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut engine = EditorEngine::default();
        let bad = EditorConfig {
            stroke_width: -1.0,
            ..EditorConfig::default()
        };
        assert!(engine.set_config(bad).is_err());
        assert_eq!(engine.config().stroke_width, 2.0);
    }
}
