//! Elementary 2D geometry: points, bounds, and folding a transform
//! affordance's scale factors back into persisted shape geometry.
//!
//! The affordance resizes an entity by applying a scale multiplier. On
//! transform-complete the multiplier is folded into the kind-specific size
//! fields and the entity goes back to unit scale, so a stored shape never
//! carries a pending scale.

use crate::model::{Image, PathPoints, ShapeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Delta from `origin` to `self`.
    pub fn delta_from(&self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Undo a clockwise rotation of `degrees` about `origin`, mapping a
    /// canvas point back into the unrotated frame.
    pub fn unrotate_about(self, origin: Point, degrees: f32) -> Point {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = self.delta_from(origin);
        Point::new(
            origin.x + dx * cos + dy * sin,
            origin.y - dx * sin + dy * cos,
        )
    }
}

/// Axis-aligned bounding box with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize two opposite corners into a bounds.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    /// Extent of a flat `x, y, x, y, …` list. Empty lists give zero bounds.
    pub fn from_points(points: &[f32]) -> Self {
        let mut pairs = points.chunks_exact(2);
        let Some(first) = pairs.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y) = (first[0], first[1]);
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in pairs {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Grow on every side by `pad`.
    pub fn inflate(self, pad: f32) -> Self {
        Self::new(
            self.x - pad,
            self.y - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }
}

// ─── Scale folding ───────────────────────────────────────────────────────

/// Scale multipliers accumulated by the transform affordance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Minimum-size rule applied when folding a resize.
///
/// Width is always floored at `min`. Height is floored only when
/// `floor_height` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeFloor {
    pub min: f32,
    pub floor_height: bool,
}

impl SizeFloor {
    fn width(&self, w: f32) -> f32 {
        floor_extent(w, self.min)
    }

    fn height(&self, h: f32) -> f32 {
        if self.floor_height {
            floor_extent(h, self.min)
        } else {
            h
        }
    }
}

/// Floor the magnitude of a signed extent, keeping its sign.
fn floor_extent(v: f32, min: f32) -> f32 {
    if v.abs() < min { min.copysign(v) } else { v }
}

/// Fold `scale` into a shape's kind-specific geometry.
pub fn fold_scale(kind: &ShapeKind, scale: Scale, floor: &SizeFloor) -> ShapeKind {
    match kind {
        ShapeKind::Rect { width, height } => {
            let (width, height) = scale_box(*width, *height, scale, floor);
            ShapeKind::Rect { width, height }
        }
        ShapeKind::Ellipse { radius_x, radius_y } => scale_ellipse(*radius_x, *radius_y, scale),
        ShapeKind::Triangle { radius } => scale_triangle(*radius, scale),
        ShapeKind::Line {
            points,
            stroke_width,
        } => ShapeKind::Line {
            points: scale_points(points, scale),
            stroke_width: *stroke_width,
        },
        ShapeKind::Pen {
            points,
            stroke_width,
        } => ShapeKind::Pen {
            points: scale_points(points, scale),
            stroke_width: *stroke_width,
        },
        ShapeKind::Text {
            width,
            height,
            text,
            font_size,
        } => {
            let (width, height) = scale_box(*width, *height, scale, floor);
            ShapeKind::Text {
                width,
                height,
                text: text.clone(),
                font_size: *font_size,
            }
        }
    }
}

/// Fold `scale` into the image size. Position and rotation are untouched.
pub fn fold_image_scale(image: &Image, scale: Scale, floor: &SizeFloor) -> Image {
    let (width, height) = scale_box(image.width, image.height, scale, floor);
    Image {
        width,
        height,
        ..image.clone()
    }
}

fn scale_box(width: f32, height: f32, scale: Scale, floor: &SizeFloor) -> (f32, f32) {
    (floor.width(width * scale.x), floor.height(height * scale.y))
}

/// The affordance sees the ellipse as its bounding box; halve the scaled box.
fn scale_ellipse(radius_x: f32, radius_y: f32, scale: Scale) -> ShapeKind {
    let box_w = radius_x * 2.0;
    let box_h = radius_y * 2.0;
    ShapeKind::Ellipse {
        radius_x: (box_w * scale.x / 2.0).floor(),
        radius_y: (box_h * scale.y / 2.0).floor(),
    }
}

/// A regular polygon is sized by one radius, so only the X scale applies.
fn scale_triangle(radius: f32, scale: Scale) -> ShapeKind {
    let box_w = radius * 2.0;
    ShapeKind::Triangle {
        radius: box_w / 2.0 * scale.x,
    }
}

/// Even indices are x coordinates, odd indices are y.
fn scale_points(points: &[f32], scale: Scale) -> PathPoints {
    points
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 2 == 0 { v * scale.x } else { v * scale.y })
        .collect()
}
