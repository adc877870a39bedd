//! Input abstraction layer.
//!
//! Normalizes pointer and keyboard events from the host into a unified
//! `InputEvent` enum consumed by the draw session and the engine.
//!
//! The rendering layer may fail to report a pointer position (e.g. the
//! pointer left the stage mid-gesture). Such events carry `pos: None` and
//! every handler ignores them.

use wb_core::Point;

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether the square/circle drawing constraint applies.
    pub fn constrain(&self) -> bool {
        self.shift
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        pos: Option<Point>,
        modifiers: Modifiers,
    },

    /// Pointer moved.
    PointerMove {
        pos: Option<Point>,
        modifiers: Modifiers,
    },

    /// Pointer released.
    PointerUp {
        pos: Option<Point>,
        modifiers: Modifiers,
    },

    /// Keyboard key pressed.
    Key {
        key: String,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            pos: finite_point(x, y),
            modifiers,
        }
    }

    pub fn pointer_move(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerMove {
            pos: finite_point(x, y),
            modifiers,
        }
    }

    pub fn pointer_up(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerUp {
            pos: finite_point(x, y),
            modifiers,
        }
    }

    /// Extract position if this is a pointer event that has one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { pos, .. }
            | Self::PointerMove { pos, .. }
            | Self::PointerUp { pos, .. } => *pos,
            Self::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::Key { modifiers, .. } => *modifiers,
        }
    }
}

/// Hosts pass NaN for "no pointer position".
fn finite_point(x: f32, y: f32) -> Option<Point> {
    (x.is_finite() && y.is_finite()).then_some(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_coordinates_mean_no_position() {
        let ev = InputEvent::pointer_down(f32::NAN, 10.0, Modifiers::NONE);
        assert_eq!(ev.position(), None);
        let ev = InputEvent::pointer_move(3.0, 4.0, Modifiers::SHIFT);
        assert_eq!(ev.position(), Some(Point::new(3.0, 4.0)));
        assert!(ev.modifiers().constrain());
    }
}
