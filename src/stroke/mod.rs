//! Brush stroke tool: per-frame controller, stroke stages, instance
//! placement, preview handles and per-kind editors

pub mod controller;
pub mod editor;
pub mod handles;
pub mod placer;
pub mod stage;

pub use controller::{
    ControllerState, DrawOutcome, FrameContext, StrokeController, StrokeReport, NO_BRUSH_LABEL,
};
pub use editor::{BrushEditor, EditorRegistry, ObjectBrushEditor};
pub use handles::{
    draw_placement_handles, draw_rotation_edit_handles, HandleColor, HandleRecorder, HandleShape,
    HandleSink,
};
pub use placer::InstancePlacer;
pub use stage::{StageKind, StrokeStage, StrokeStages};
