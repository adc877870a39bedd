//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so it's shared across WASM and native.
//!
//! Single-key tool shortcuts only fire without ⌘/Ctrl, so browser
//! bindings like ⌘R keep working.

use crate::session::DrawTool;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    /// Disarm any draw tool (plain selection mode).
    ToolSelect,
    Arm(DrawTool),

    // ── Edit ──
    Delete,
    /// Clear the selection, drop any draft, and disarm.
    Deselect,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"r"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        _shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        if ctrl || meta {
            return None;
        }

        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "r" | "R" => Some(ShortcutAction::Arm(DrawTool::Rect)),
            "o" | "O" => Some(ShortcutAction::Arm(DrawTool::Ellipse)),
            "3" => Some(ShortcutAction::Arm(DrawTool::Triangle)),
            "l" | "L" => Some(ShortcutAction::Arm(DrawTool::Line)),
            "p" | "P" => Some(ShortcutAction::Arm(DrawTool::Pen)),
            "t" | "T" => Some(ShortcutAction::Arm(DrawTool::Text)),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tool_shortcuts() {
        let cases = [
            ("v", ShortcutAction::ToolSelect),
            ("r", ShortcutAction::Arm(DrawTool::Rect)),
            ("O", ShortcutAction::Arm(DrawTool::Ellipse)),
            ("3", ShortcutAction::Arm(DrawTool::Triangle)),
            ("l", ShortcutAction::Arm(DrawTool::Line)),
            ("p", ShortcutAction::Arm(DrawTool::Pen)),
            ("t", ShortcutAction::Arm(DrawTool::Text)),
        ];
        for (key, action) in cases {
            assert_eq!(
                ShortcutMap::resolve(key, false, false, false, false),
                Some(action),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
    }

    #[test]
    fn resolve_escape() {
        assert_eq!(
            ShortcutMap::resolve("Escape", false, false, false, false),
            Some(ShortcutAction::Deselect)
        );
    }

    #[test]
    fn command_combos_are_left_to_the_browser() {
        assert_eq!(ShortcutMap::resolve("r", true, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("Delete", false, false, false, true), None);
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("7", false, false, false, false), None);
    }
}
