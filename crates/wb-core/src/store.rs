//! The collection store: committed shapes plus the optional background image.
//!
//! All operations are synchronous and work on the full in-memory list.
//! Order is paint order (first = bottom).

use crate::config::Viewport;
use crate::id::ShapeId;
use crate::model::{Entity, Image, Shape};

#[derive(Debug, Clone, Default)]
pub struct Board {
    shapes: Vec<Shape>,
    image: Option<Image>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed shape.
    ///
    /// # Errors
    /// Returns an error if a shape or the image already uses the same id.
    pub fn insert(&mut self, shape: Shape) -> Result<(), String> {
        if self.contains(shape.id) {
            return Err(format!("duplicate id: {}", shape.id));
        }
        log::debug!("insert {} {}", shape.kind.name(), shape.id);
        self.shapes.push(shape);
        Ok(())
    }

    /// Overwrite the shape with `id` in place, keeping its paint order.
    /// Returns `false` if no shape has that id.
    pub fn replace_at(&mut self, id: ShapeId, shape: Shape) -> bool {
        match self.shapes.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Remove the entity with `id`: any matching shape, and the image if it
    /// carries that id. Returns `true` if anything was removed.
    pub fn delete(&mut self, id: ShapeId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        let mut removed = self.shapes.len() != before;

        if self.image.as_ref().is_some_and(|img| img.id == id) {
            self.image = None;
            removed = true;
        }
        if removed {
            log::debug!("delete {id}");
        }
        removed
    }

    /// Install a new background image, returning the one it replaces.
    pub fn set_image(&mut self, image: Image) -> Option<Image> {
        log::debug!("set image {}", image.id);
        self.image.replace(image)
    }

    /// Overwrite the current image if it has the same id.
    pub fn update_image(&mut self, image: Image) -> bool {
        match &mut self.image {
            Some(slot) if slot.id == image.id => {
                *slot = image;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Resolve an id to a shape or the image.
    pub fn entity(&self, id: ShapeId) -> Option<Entity<'_>> {
        if let Some(shape) = self.get(id) {
            return Some(Entity::Shape(shape));
        }
        self.image
            .as_ref()
            .filter(|img| img.id == id)
            .map(Entity::Image)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.entity(id).is_some()
    }

    /// Committed shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.image.is_none()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.image = None;
    }
}

/// Place a freshly decoded bitmap: shown at half its natural size,
/// offset from the viewport center by a quarter of its natural size.
pub fn place_image(src: &str, natural_width: f32, natural_height: f32, viewport: Viewport) -> Image {
    Image {
        id: ShapeId::with_prefix("image"),
        src: src.to_string(),
        x: viewport.width / 2.0 - natural_width / 4.0,
        y: viewport.height / 2.0 - natural_height / 4.0,
        width: natural_width / 2.0,
        height: natural_height / 2.0,
        rotation: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, ShapeKind};

    fn rect(w: f32, h: f32) -> Shape {
        Shape::new(
            ShapeKind::Rect {
                width: w,
                height: h,
            },
            0.0,
            0.0,
            Color::BLUE,
        )
    }

    #[test]
    fn insert_appends_and_rejects_duplicates() {
        let mut board = Board::new();
        let a = rect(1.0, 1.0);
        let b = rect(2.0, 2.0);
        board.insert(a.clone()).unwrap();
        board.insert(b.clone()).unwrap();
        assert_eq!(board.shapes(), &[a.clone(), b]);
        assert!(board.insert(a).is_err());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn replace_at_preserves_order() {
        let mut board = Board::new();
        let a = rect(1.0, 1.0);
        let b = rect(2.0, 2.0);
        let c = rect(3.0, 3.0);
        for s in [&a, &b, &c] {
            board.insert(s.clone()).unwrap();
        }
        let replacement = Shape { x: 50.0, ..b.clone() };
        assert!(board.replace_at(b.id, replacement.clone()));
        assert_eq!(board.shapes()[1], replacement);
        assert_eq!(board.shapes()[0].id, a.id);
        assert_eq!(board.shapes()[2].id, c.id);

        assert!(!board.replace_at(ShapeId::intern("missing"), replacement));
    }

    #[test]
    fn delete_image_id_clears_image() {
        let mut board = Board::new();
        let image = place_image("blob:a", 400.0, 200.0, Viewport::default());
        let id = image.id;
        board.set_image(image);
        board.insert(rect(1.0, 1.0)).unwrap();

        assert!(board.delete(id));
        assert!(board.image().is_none());
        assert_eq!(board.len(), 1);
        assert!(!board.delete(id));
    }

    #[test]
    fn place_image_centers_half_size() {
        let image = place_image(
            "blob:b",
            400.0,
            200.0,
            Viewport {
                width: 1000.0,
                height: 800.0,
            },
        );
        assert_eq!((image.width, image.height), (200.0, 100.0));
        assert_eq!((image.x, image.y), (400.0, 350.0));
    }

    #[test]
    fn entity_resolves_shapes_and_image() {
        let mut board = Board::new();
        let shape = rect(4.0, 4.0);
        board.insert(shape.clone()).unwrap();
        let image = place_image("blob:c", 10.0, 10.0, Viewport::default());
        let image_id = image.id;
        board.set_image(image);

        assert!(matches!(board.entity(shape.id), Some(Entity::Shape(_))));
        assert!(matches!(board.entity(image_id), Some(Entity::Image(_))));
        assert!(board.entity(ShapeId::intern("nope")).is_none());
    }
}
