//! Selection & transform controller.
//!
//! Tracks the single selected entity and the transform affordance bound to
//! it, and turns completed drag/transform/text/color gestures into
//! replacement mutations. The controller never touches the board itself.

use crate::engine::BoardMutation;
use wb_core::model::{Color, Entity, Shape, ShapeKind};
use wb_core::{Board, Scale, ShapeId, SizeFloor, fold_image_scale, fold_scale};

/// The resize/rotate handles attached to the selected entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordance {
    pub target: ShapeId,
    /// Live scale reported while a transform is in progress.
    /// Back to identity once the transform completes.
    pub scale: Scale,
    pub rotation: f32,
}

/// Final geometry reported by the rendering layer when a transform ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEnd {
    pub x: f32,
    pub y: f32,
    pub scale: Scale,
    pub rotation: f32,
}

#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<ShapeId>,
    affordance: Option<Affordance>,
    /// Text shape currently shown as an inline editor. Survives selection
    /// changes: the editor's blur (and `commit_text`) arrives after the
    /// pointer-down that moved the selection.
    editing: Option<ShapeId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn affordance(&self) -> Option<&Affordance> {
        self.affordance.as_ref()
    }

    pub fn editing(&self) -> Option<ShapeId> {
        self.editing
    }

    /// A click on `hit`, or on empty canvas when `None`.
    /// Returns `true` if the selection changed.
    pub fn click(&mut self, board: &Board, hit: Option<ShapeId>) -> bool {
        match hit.and_then(|id| board.entity(id)) {
            Some(entity) => self.set(Some(entity)),
            None => self.set(None),
        }
    }

    /// Select by id. Unknown ids are rejected and leave the selection as is.
    pub fn select(&mut self, board: &Board, id: ShapeId) -> bool {
        match board.entity(id) {
            Some(entity) => {
                self.set(Some(entity));
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    fn set(&mut self, entity: Option<Entity<'_>>) -> bool {
        let id = entity.map(|e| e.id());
        if id == self.selected {
            return false;
        }
        log::debug!("select {id:?}");
        self.selected = id;
        self.affordance = entity.map(|e| Affordance {
            target: e.id(),
            scale: Scale::IDENTITY,
            rotation: match e {
                Entity::Shape(s) => s.rotation,
                Entity::Image(i) => i.rotation,
            },
        });
        true
    }

    /// Drop references to entities that no longer exist.
    pub fn revalidate(&mut self, board: &Board) {
        if let Some(id) = self.selected
            && !board.contains(id)
        {
            log::debug!("selection {id} removed");
            self.selected = None;
            self.affordance = None;
        }
        if let Some(id) = self.editing
            && board.get(id).is_none()
        {
            self.editing = None;
        }
    }

    // ─── Transform ───────────────────────────────────────────────────────

    /// Record live affordance state while the user drags a handle.
    ///
    /// A box that would shrink either extent below `min_size` is refused:
    /// the previous scale is kept and `false` tells the host to revert its
    /// handles. Extents already under the minimum may still grow.
    pub fn transform(
        &mut self,
        board: &Board,
        scale: Scale,
        rotation: f32,
        min_size: f32,
    ) -> bool {
        let Some(aff) = &mut self.affordance else {
            return false;
        };
        let Some(entity) = board.entity(aff.target) else {
            return false;
        };
        let bounds = match entity {
            Entity::Shape(s) => s.bounds(),
            Entity::Image(i) => i.bounds(),
        };
        let too_small = |extent: f32, factor: f32| {
            let scaled = (extent * factor).abs();
            scaled < min_size && scaled < extent
        };
        if too_small(bounds.width, scale.x) || too_small(bounds.height, scale.y) {
            log::trace!("transform {} refused at {scale:?}", aff.target);
            return false;
        }
        aff.scale = scale;
        aff.rotation = rotation;
        true
    }

    /// Fold the final scale into the selected entity's geometry and reset
    /// the affordance to unit scale.
    pub fn transform_end(
        &mut self,
        board: &Board,
        end: TransformEnd,
        floor: &SizeFloor,
    ) -> Vec<BoardMutation> {
        let Some(aff) = &mut self.affordance else {
            return vec![];
        };
        aff.scale = Scale::IDENTITY;
        aff.rotation = end.rotation;

        match board.entity(aff.target) {
            Some(Entity::Shape(shape)) => {
                let replacement = Shape {
                    x: end.x,
                    y: end.y,
                    rotation: end.rotation,
                    kind: fold_scale(&shape.kind, end.scale, floor),
                    ..shape.clone()
                };
                vec![BoardMutation::ReplaceShape {
                    id: shape.id,
                    shape: Box::new(replacement),
                }]
            }
            Some(Entity::Image(image)) => {
                let mut scaled = fold_image_scale(image, end.scale, floor);
                scaled.x = end.x;
                scaled.y = end.y;
                scaled.rotation = end.rotation;
                vec![BoardMutation::UpdateImage {
                    image: Box::new(scaled),
                }]
            }
            None => vec![],
        }
    }

    /// A drag finished at (x, y). Only the position changes, and only the
    /// selected entity can be dragged.
    pub fn drag_end(&self, board: &Board, id: ShapeId, x: f32, y: f32) -> Vec<BoardMutation> {
        if self.selected != Some(id) {
            return vec![];
        }
        match board.entity(id) {
            Some(Entity::Shape(shape)) if !shape.draggable => vec![],
            Some(_) => vec![BoardMutation::MoveEntity { id, x, y }],
            None => vec![],
        }
    }

    // ─── Style & text ────────────────────────────────────────────────────

    /// Repaint the selected shape with `color` (fill, or stroke for lines
    /// and pen strokes). Nothing happens when it already has that color or
    /// when the selection is the image.
    pub fn apply_color(&self, board: &Board, color: Color) -> Vec<BoardMutation> {
        match self.selected.and_then(|id| board.get(id)) {
            Some(shape) if shape.color != color => vec![BoardMutation::SetColor {
                id: shape.id,
                color,
            }],
            _ => vec![],
        }
    }

    /// Double-click: a text shape switches into inline editing.
    /// Returns `true` if edit mode started.
    pub fn double_click(&mut self, board: &Board, hit: Option<ShapeId>) -> bool {
        let Some(shape) = hit.and_then(|id| board.get(id)) else {
            return false;
        };
        if !matches!(shape.kind, ShapeKind::Text { .. }) {
            return false;
        }
        self.set(Some(Entity::Shape(shape)));
        self.editing = Some(shape.id);
        log::debug!("edit text {}", shape.id);
        true
    }

    /// The inline editor lost focus: write `text` back and leave edit mode.
    pub fn commit_text(&mut self, text: &str) -> Vec<BoardMutation> {
        match self.editing.take() {
            Some(id) => vec![BoardMutation::SetText {
                id,
                text: text.to_string(),
            }],
            None => vec![],
        }
    }
}
