//! Scenebrush - procedural surface-placement brushes for scene painting

pub mod core;
pub mod math;
pub mod brush;
pub mod placement;
pub mod stroke;
pub mod scene;
pub mod store;
pub mod preferences;
