pub mod config;
pub mod geometry;
pub mod hit;
pub mod id;
pub mod model;
pub mod store;

pub use config::{EditorConfig, Viewport};
pub use geometry::{Bounds, Point, Scale, SizeFloor, fold_image_scale, fold_scale};
pub use hit::hit_test;
pub use id::ShapeId;
pub use model::*;
pub use store::{Board, place_image};
