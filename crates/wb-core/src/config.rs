//! Editor configuration.
//!
//! Every constant the editor applies while drawing or resizing lives here,
//! so hosts can tune them from JSON. All fields default; a partial JSON
//! object overrides only what it names.

use crate::geometry::SizeFloor;
use crate::model::Color;
use serde::{Deserialize, Serialize};

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Smallest width a resize may produce. Default: **5**.
    pub min_size: f32,

    /// Also floor height at `min_size`. Default: **false** (only width is
    /// floored, matching the transform handles' historical behavior).
    pub floor_height: bool,

    /// Triangle radius per unit of drag. Default: **1.15**, so the
    /// triangle's bounding box roughly matches the dragged rectangle.
    pub triangle_fit: f32,

    /// Initial swatch color. Default: blue.
    pub default_color: Color,

    /// Stroke width for lines and pen strokes. Default: **2**.
    pub stroke_width: f32,

    pub font_size: f32,
    pub text_width: f32,
    pub text_height: f32,
    pub default_text: String,

    /// Canvas size, used to center uploaded images.
    pub viewport: Viewport,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 5.0,
            floor_height: false,
            triangle_fit: 1.15,
            default_color: Color::BLUE,
            stroke_width: 2.0,
            font_size: 20.0,
            text_width: 200.0,
            text_height: 30.0,
            default_text: "Double click to edit".into(),
            viewport: Viewport::default(),
        }
    }
}

impl EditorConfig {
    pub fn size_floor(&self) -> SizeFloor {
        SizeFloor {
            min: self.min_size,
            floor_height: self.floor_height,
        }
    }

    /// Reject values no gesture could work with.
    ///
    /// # Errors
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_size.is_finite() || self.min_size < 0.0 {
            return Err(format!("minSize must be >= 0, got {}", self.min_size));
        }
        if !self.triangle_fit.is_finite() || self.triangle_fit <= 0.0 {
            return Err(format!(
                "triangleFit must be > 0, got {}",
                self.triangle_fit
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(format!(
                "strokeWidth must be > 0, got {}",
                self.stroke_width
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(format!("fontSize must be > 0, got {}", self.font_size));
        }
        Ok(())
    }
}
