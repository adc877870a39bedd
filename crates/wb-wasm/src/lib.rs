//! WASM bridge for the whiteboard: exposes the editor engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The JS side owns rendering
//! (a Konva-style stage) and forwards pointer, key, and affordance events
//! here; after each call it re-reads `scene_json()` when the call reports a
//! change.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wb_core::model::Color;
use wb_core::{EditorConfig, Scale, ShapeId, Viewport, hit_test};
use wb_editor::engine::EditorEngine;
use wb_editor::input::{InputEvent, Modifiers};
use wb_editor::selection::TransformEnd;
use wb_editor::session::DrawTool;
use wb_editor::shortcuts::{ShortcutAction, ShortcutMap};

/// The main WASM-facing canvas controller.
///
/// Holds the editor engine. All interaction from the page goes through
/// this struct.
#[wasm_bindgen]
pub struct WhiteboardCanvas {
    engine: EditorEngine,
}

/// Result of `handle_key`.
#[derive(Debug, Serialize)]
struct KeyResult {
    changed: bool,
    action: &'static str,
    tool: &'static str,
}

#[wasm_bindgen]
impl WhiteboardCanvas {
    /// Create a new canvas controller with the given stage dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        console_error_panic_hook_setup();

        let config = EditorConfig {
            viewport: Viewport { width, height },
            ..EditorConfig::default()
        };
        Self {
            engine: EditorEngine::new(config),
        }
    }

    /// Replace the editor configuration from a (partial) JSON object.
    /// The stage size is kept; use `resize` to change it.
    /// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn set_config(&mut self, json: &str) -> String {
        let result = serde_json::from_str::<EditorConfig>(json)
            .map_err(|e| format!("invalid config: {e}"))
            .and_then(|mut config| {
                config.viewport = self.engine.config().viewport;
                self.engine.set_config(config)
            });
        match result {
            Ok(()) => ok_json(),
            Err(e) => {
                log::warn!("{e}");
                error_json(&e)
            }
        }
    }

    /// The active configuration as JSON.
    pub fn get_config(&self) -> String {
        serde_json::to_string(self.engine.config()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Resize the stage. Only affects where future images are centered.
    pub fn resize(&mut self, width: f32, height: f32) {
        let config = EditorConfig {
            viewport: Viewport { width, height },
            ..self.engine.config().clone()
        };
        if let Err(e) = self.engine.set_config(config) {
            log::warn!("resize rejected: {e}");
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Arm a draw tool by name. `"select"` or an unknown name disarms.
    pub fn set_tool(&mut self, name: &str) {
        self.engine.arm_tool(name.parse::<DrawTool>().ok());
    }

    /// Get the armed tool name, `"select"` when none is armed.
    pub fn get_tool_name(&self) -> String {
        tool_name(self.engine.session.armed()).to_string()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Handle pointer down. `NaN` coordinates mean the stage could not
    /// report a position. Returns true if the scene needs a re-render.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::pointer_down(x, y, modifiers(shift, ctrl, alt, meta));
        let hit = self.hit_test(x, y);
        self.engine.pointer_down(&event, hit)
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::pointer_move(x, y, modifiers(shift, ctrl, alt, meta));
        self.engine.pointer_move(&event)
    }

    pub fn handle_pointer_up(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::pointer_up(x, y, modifiers(shift, ctrl, alt, meta));
        self.engine.pointer_up(&event)
    }

    /// Double-click: a text shape under the pointer enters inline editing.
    pub fn handle_double_click(&mut self, x: f32, y: f32) -> bool {
        let hit = self.hit_test(x, y);
        self.engine.double_click(hit)
    }

    /// The inline text editor lost focus.
    pub fn commit_text(&mut self, text: &str) -> bool {
        self.engine.commit_text(text)
    }

    /// Id of the text shape being edited, or empty string if none.
    pub fn get_editing_id(&self) -> String {
        self.engine
            .selection
            .editing()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Affordance ──────────────────────────────────────────────────────

    pub fn drag_end(&mut self, id: &str, x: f32, y: f32) -> bool {
        match ShapeId::lookup(id) {
            Some(id) => self.engine.drag_end(id, x, y),
            None => false,
        }
    }

    /// Live transform handle feedback. Returns `false` when the new box is
    /// below the minimum size; the page should then keep the old box.
    pub fn transform(&mut self, scale_x: f32, scale_y: f32, rotation: f32) -> bool {
        self.engine.transform(Scale::new(scale_x, scale_y), rotation)
    }

    pub fn transform_end(
        &mut self,
        x: f32,
        y: f32,
        scale_x: f32,
        scale_y: f32,
        rotation: f32,
    ) -> bool {
        self.engine.transform_end(TransformEnd {
            x,
            y,
            scale: Scale::new(scale_x, scale_y),
            rotation,
        })
    }

    // ─── Selection & style ───────────────────────────────────────────────

    /// Set the swatch color and repaint the selection. Returns false for an
    /// unparseable hex string or when nothing was repainted.
    pub fn set_color(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => self.engine.apply_color(color),
            None => {
                log::warn!("invalid color: {hex:?}");
                false
            }
        }
    }

    pub fn get_color(&self) -> String {
        self.engine.color.to_hex()
    }

    /// Delete the selected shape or image. Returns true if one was deleted.
    pub fn delete_selected(&mut self) -> bool {
        self.engine.delete_selected()
    }

    /// Select an entity by id. An empty id clears the selection.
    /// Returns `true` if the entity was found (or the selection cleared).
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            self.engine.selection.clear();
            return true;
        }
        match ShapeId::lookup(id) {
            Some(id) => self.engine.selection.select(&self.engine.board, id),
            None => false,
        }
    }

    /// Get the selected entity id, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        self.engine
            .selection
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Image ───────────────────────────────────────────────────────────

    /// Called once the page has decoded an uploaded bitmap. Replaces any
    /// previous image. Returns the new image id.
    pub fn load_image(&mut self, src: &str, natural_width: f32, natural_height: f32) -> String {
        self.engine
            .load_image(src, natural_width, natural_height)
            .as_str()
            .to_string()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>", "tool":"<tool_name>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        // Keys typed into the inline text editor belong to it.
        let action = match self.engine.selection.editing() {
            Some(_) => None,
            None => ShortcutMap::resolve(key, ctrl, shift, alt, meta),
        };
        let changed = action.is_some_and(|a| self.engine.handle_action(a));
        let result = KeyResult {
            changed,
            action: action.map_or("none", action_to_name),
            tool: tool_name(self.engine.session.armed()),
        };
        serde_json::to_string(&result).unwrap_or_else(|e| error_json(&e.to_string()))
    }

    // ─── Rendering boundary ──────────────────────────────────────────────

    /// The full scene as JSON: image, shapes in paint order, draft,
    /// selection, editing id, armed tool, swatch color.
    pub fn scene_json(&self) -> String {
        match serde_json::to_string(&self.engine.scene()) {
            Ok(json) => json,
            Err(e) => error_json(&format!("Serialization error: {e}")),
        }
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl WhiteboardCanvas {
    fn hit_test(&self, x: f32, y: f32) -> Option<ShapeId> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        hit_test(&self.engine.board, x, y)
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn tool_name(tool: Option<DrawTool>) -> &'static str {
    tool.map_or("select", |t| t.name())
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::ToolSelect => "toolSelect",
        ShortcutAction::Arm(DrawTool::Rect) => "toolRect",
        ShortcutAction::Arm(DrawTool::Ellipse) => "toolEllipse",
        ShortcutAction::Arm(DrawTool::Triangle) => "toolTriangle",
        ShortcutAction::Arm(DrawTool::Line) => "toolLine",
        ShortcutAction::Arm(DrawTool::Pen) => "toolPen",
        ShortcutAction::Arm(DrawTool::Text) => "toolText",
        ShortcutAction::Delete => "delete",
        ShortcutAction::Deselect => "deselect",
    }
}

fn ok_json() -> String {
    serde_json::json!({ "ok": true }).to_string()
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("whiteboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    fn drag(canvas: &mut WhiteboardCanvas, from: (f32, f32), to: (f32, f32)) {
        canvas.handle_pointer_down(from.0, from.1, false, false, false, false);
        canvas.handle_pointer_move(to.0, to.1, false, false, false, false);
        canvas.handle_pointer_up(to.0, to.1, false, false, false, false);
    }

    #[test]
    fn draw_rect_then_select_by_click() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        canvas.set_tool("rect");
        assert_eq!(canvas.get_tool_name(), "rect");
        drag(&mut canvas, (10.0, 10.0), (110.0, 60.0));
        assert_eq!(canvas.get_tool_name(), "select");

        let scene = parse(&canvas.scene_json());
        let shapes = scene["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["type"], "RECT");
        assert_eq!(shapes[0]["width"], 100.0);
        assert_eq!(shapes[0]["color"], "#0000FF");

        assert!(canvas.handle_pointer_down(50.0, 30.0, false, false, false, false));
        assert_eq!(canvas.get_selected_id(), shapes[0]["id"].as_str().unwrap());
    }

    #[test]
    fn transform_reports_refused_boxes() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        canvas.set_tool("rect");
        drag(&mut canvas, (0.0, 0.0), (40.0, 40.0));
        canvas.handle_pointer_down(20.0, 20.0, false, false, false, false);

        assert!(canvas.transform(1.5, 0.5, 0.0));
        assert!(!canvas.transform(1.0, 0.1, 0.0));
        assert!(!canvas.drag_end("never-created", 0.0, 0.0));
    }

    #[test]
    fn nan_pointer_is_ignored() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        canvas.set_tool("ellipse");
        assert!(!canvas.handle_pointer_down(f32::NAN, f32::NAN, false, false, false, false));
        assert_eq!(canvas.get_tool_name(), "ellipse");
        assert_eq!(parse(&canvas.scene_json())["draft"], Value::Null);
    }

    #[test]
    fn set_config_reports_errors_as_json() {
        let mut canvas = WhiteboardCanvas::new(640.0, 480.0);
        assert_eq!(parse(&canvas.set_config(r#"{"minSize":2}"#))["ok"], true);
        let config = parse(&canvas.get_config());
        assert_eq!(config["minSize"], 2.0);
        assert_eq!(config["viewport"]["width"], 640.0);

        let bad = parse(&canvas.set_config("{not json"));
        assert_eq!(bad["ok"], false);
        assert!(bad["error"].as_str().unwrap().starts_with("invalid config"));
    }

    #[test]
    fn handle_key_reports_action_and_tool() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        let result = parse(&canvas.handle_key("3", false, false, false, false));
        assert_eq!(result["action"], "toolTriangle");
        assert_eq!(result["tool"], "triangle");
        assert_eq!(result["changed"], false);

        let result = parse(&canvas.handle_key("Escape", false, false, false, false));
        assert_eq!(result["action"], "deselect");
        assert_eq!(result["tool"], "select");

        let result = parse(&canvas.handle_key("q", false, false, false, false));
        assert_eq!(result["action"], "none");
    }

    #[test]
    fn keys_go_to_text_editor_while_editing() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        canvas.set_tool("text");
        canvas.handle_pointer_down(20.0, 20.0, false, false, false, false);
        canvas.handle_pointer_up(20.0, 20.0, false, false, false, false);
        assert!(canvas.handle_double_click(25.0, 25.0));
        assert!(!canvas.get_editing_id().is_empty());

        let result = parse(&canvas.handle_key("Backspace", false, false, false, false));
        assert_eq!(result["action"], "none");
        assert!(canvas.commit_text("hello"));
        assert_eq!(parse(&canvas.scene_json())["shapes"][0]["text"], "hello");
    }

    #[test]
    fn load_image_centers_and_replaces() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        let first = canvas.load_image("blob:a", 400.0, 200.0);
        assert!(canvas.select_by_id(&first));

        let second = canvas.load_image("blob:b", 400.0, 200.0);
        assert_ne!(first, second);
        assert_eq!(canvas.get_selected_id(), "");

        let image = &parse(&canvas.scene_json())["image"];
        assert_eq!(image["src"], "blob:b");
        assert_eq!(image["x"], 300.0);
        assert_eq!(image["y"], 250.0);
        assert_eq!(image["width"], 200.0);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        assert!(!canvas.select_by_id("never-created"));
        assert!(!canvas.drag_end("never-created", 1.0, 1.0));
        assert!(canvas.select_by_id(""));
    }

    #[test]
    fn set_color_rejects_bad_hex() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        assert!(!canvas.set_color("#zzz"));
        assert_eq!(canvas.get_color(), "#0000FF");
        canvas.set_color("#ff0000");
        assert_eq!(canvas.get_color(), "#FF0000");
    }

    #[test]
    fn unknown_tool_name_disarms() {
        let mut canvas = WhiteboardCanvas::new(800.0, 600.0);
        canvas.set_tool("pen");
        canvas.set_tool("lasso");
        assert_eq!(canvas.get_tool_name(), "select");
    }
}
