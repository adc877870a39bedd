pub mod engine;
pub mod input;
pub mod selection;
pub mod session;
pub mod shortcuts;

pub use engine::{BoardMutation, EditorEngine, Scene};
pub use input::{InputEvent, Modifiers};
pub use selection::{Affordance, SelectionController, TransformEnd};
pub use session::{DrawSession, DrawTool, SessionState};
pub use shortcuts::{ShortcutAction, ShortcutMap};
