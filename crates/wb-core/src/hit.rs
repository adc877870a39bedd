//! Hit testing: point → entity lookup.
//!
//! Walks the board front-to-back: shapes in reverse paint order first,
//! then the background image beneath them. Rotated entities are tested in
//! their own unrotated frame (rotation is about the entity origin).

use crate::geometry::Point;
use crate::id::ShapeId;
use crate::model::ShapeKind;
use crate::store::Board;

/// Extra slack around stroked shapes so thin lines stay clickable.
const STROKE_SLOP: f32 = 4.0;

/// Find the topmost entity at position (px, py).
/// Returns `None` if only empty canvas is hit.
pub fn hit_test(board: &Board, px: f32, py: f32) -> Option<ShapeId> {
    let pointer = Point::new(px, py);
    for shape in board.shapes().iter().rev() {
        let p = pointer.unrotate_about(Point::new(shape.x, shape.y), shape.rotation);
        let bounds = match &shape.kind {
            ShapeKind::Line { stroke_width, .. } | ShapeKind::Pen { stroke_width, .. } => shape
                .bounds()
                .inflate(stroke_width / 2.0 + STROKE_SLOP),
            _ => shape.bounds(),
        };
        if bounds.contains(p.x, p.y) {
            return Some(shape.id);
        }
    }

    board
        .image()
        .filter(|img| {
            let p = pointer.unrotate_about(Point::new(img.x, img.y), img.rotation);
            img.bounds().contains(p.x, p.y)
        })
        .map(|img| img.id)
}
