//! Per-kind brush editors
//!
//! Configuration surfaces look up an editor for the brush they show through
//! `EditorRegistry`. Editors own the non-visual bookkeeping of their kind.

use std::collections::HashMap;

use crate::brush::{Brush, BrushKind, TemplateLibrary};

/// Editing hooks for one brush kind
pub trait BrushEditor {
    fn kind(&self) -> BrushKind;

    /// Called when the brush is first shown
    fn init(&mut self, brush: &mut Brush, templates: &TemplateLibrary);

    /// Called after the brush was edited
    fn refresh(&mut self, brush: &mut Brush, templates: &TemplateLibrary);
}

/// Editor for object brushes
#[derive(Debug, Default)]
pub struct ObjectBrushEditor;

impl BrushEditor for ObjectBrushEditor {
    fn kind(&self) -> BrushKind {
        BrushKind::Object
    }

    /// Brushes without a source template start from the library default.
    /// Existing draw-object assignments are kept.
    fn init(&mut self, brush: &mut Brush, templates: &TemplateLibrary) {
        if brush.selected_object().is_none() {
            if let Some(default) = templates.default_template() {
                // Rebuilds the draw objects
                brush.set_selected_object(Some(default), templates);
            }
        }
        self.refresh(brush, templates);
    }

    /// Source and unpack setters rebuild on their own, so only indices need fixing
    fn refresh(&mut self, brush: &mut Brush, _templates: &TemplateLibrary) {
        brush.clamp_settings_indices();
    }
}

type EditorFactory = fn() -> Box<dyn BrushEditor>;

/// Static map from brush kind to editor factory
#[derive(Default)]
pub struct EditorRegistry {
    factories: HashMap<BrushKind, EditorFactory>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an editor for every built-in kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BrushKind::Object, || -> Box<dyn BrushEditor> { Box::new(ObjectBrushEditor) });
        registry
    }

    pub fn register(&mut self, kind: BrushKind, factory: EditorFactory) {
        self.factories.insert(kind, factory);
    }

    /// Fresh editor for the brush's kind, `None` when none is registered
    pub fn editor_for(&self, brush: &Brush) -> Option<Box<dyn BrushEditor>> {
        match self.factories.get(&brush.kind()) {
            Some(factory) => Some(factory()),
            None => {
                log::warn!("No editor registered for {} '{}'", brush.kind(), brush.name);
                None
            }
        }
    }
}
