//! Persistence of brushes and template definitions

pub mod asset_store;
pub mod record;

pub use asset_store::{load_templates, AssetStore, BRUSH_FILE_EXTENSION};
pub use record::{default_templates, BrushRecord, DrawObjectRecord, TemplateFile, TemplateRecord};
