//! Brush configuration model
//!
//! A brush groups object templates with the placement rules applied to them.
//! Brushes live in a `BrushLibrary`, which also resolves sub-brush variants.

pub mod template;
pub mod settings;
pub mod brush;
pub mod library;

// Re-exports
pub use template::{Template, TemplateId, TemplateLibrary};
pub use settings::{ModelSettings, OffsetSettings, RandomMode, RandomOffsetSettings, TURN_OFF_AUTO_COLLIDERS};
pub use brush::{Brush, BrushId, BrushKind, DrawObject};
pub use library::BrushLibrary;
