//! Core data model for whiteboard documents.
//!
//! A board is a flat, ordered list of shapes painted back to front, plus at
//! most one background image painted beneath them. Shapes are a tagged sum
//! type: common placement/style fields live on `Shape`, kind-specific
//! geometry lives on `ShapeKind`.
//!
//! Shapes are values. Handlers never patch a committed shape field by field;
//! they build a full replacement and hand it to the store.

use crate::geometry::Bounds;
use crate::id::ShapeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], exchanged as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value:?}"))
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Flat `x0, y0, x1, y1, …` coordinate list, relative to the shape origin.
/// Straight lines (two points) stay inline.
pub type PathPoints = SmallVec<[f32; 4]>;

/// Kind-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ShapeKind {
    /// Anchored at its top-left corner. Extents keep the sign of the drag
    /// that produced them.
    Rect { width: f32, height: f32 },
    /// Centered on the shape origin.
    Ellipse { radius_x: f32, radius_y: f32 },
    /// Regular three-sided polygon centered on the shape origin.
    Triangle { radius: f32 },
    Line {
        points: PathPoints,
        stroke_width: f32,
    },
    /// Freehand stroke.
    Pen {
        points: PathPoints,
        stroke_width: f32,
    },
    Text {
        width: f32,
        height: f32,
        text: String,
        font_size: f32,
    },
}

impl ShapeKind {
    /// Short lowercase name, also used as the id prefix.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Triangle { .. } => "triangle",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Pen { .. } => "pen",
            ShapeKind::Text { .. } => "text",
        }
    }
}

/// A committed (or draft) shape on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    pub x: f32,
    pub y: f32,
    /// Degrees, clockwise, as reported by the transform affordance.
    #[serde(default)]
    pub rotation: f32,
    /// Fill for closed shapes and text, stroke for lines and pen strokes.
    pub color: Color,
    pub draggable: bool,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Build a new shape with a freshly generated id.
    pub fn new(kind: ShapeKind, x: f32, y: f32, color: Color) -> Self {
        Self {
            id: ShapeId::with_prefix(kind.name()),
            x,
            y,
            rotation: 0.0,
            color,
            draggable: true,
            kind,
        }
    }

    /// Axis-aligned bounds in canvas coordinates (rotation ignored).
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ShapeKind::Rect { width, height } => {
                Bounds::from_corners(self.x, self.y, self.x + width, self.y + height)
            }
            ShapeKind::Ellipse { radius_x, radius_y } => {
                let (rx, ry) = (radius_x.abs(), radius_y.abs());
                Bounds::new(self.x - rx, self.y - ry, rx * 2.0, ry * 2.0)
            }
            ShapeKind::Triangle { radius } => {
                let r = radius.abs();
                Bounds::new(self.x - r, self.y - r, r * 2.0, r * 2.0)
            }
            ShapeKind::Line { points, .. } | ShapeKind::Pen { points, .. } => {
                Bounds::from_points(points).translate(self.x, self.y)
            }
            ShapeKind::Text { width, height, .. } => {
                Bounds::from_corners(self.x, self.y, self.x + width, self.y + height)
            }
        }
    }

    /// Zero-extent shapes are dropped instead of committed.
    ///
    /// Pen strokes and text boxes are never degenerate.
    pub fn is_degenerate(&self) -> bool {
        match &self.kind {
            ShapeKind::Rect { width, height } => *width == 0.0 || *height == 0.0,
            ShapeKind::Ellipse { radius_x, radius_y } => *radius_x == 0.0 || *radius_y == 0.0,
            ShapeKind::Triangle { radius } => *radius == 0.0,
            ShapeKind::Line { points, .. } => match points.as_slice() {
                [x0, y0, x1, y1, ..] => x0 == x1 && y0 == y1,
                _ => true,
            },
            ShapeKind::Pen { .. } | ShapeKind::Text { .. } => false,
        }
    }
}

// ─── Image ───────────────────────────────────────────────────────────────

/// The single background image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ShapeId,
    /// Bitmap handle resolved by the rendering layer (object or data URL).
    pub src: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
}

impl Image {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A borrowed reference to anything that can be selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Shape(&'a Shape),
    Image(&'a Image),
}

impl Entity<'_> {
    pub fn id(&self) -> ShapeId {
        match self {
            Entity::Shape(s) => s.id,
            Entity::Image(i) => i.id,
        }
    }
}
