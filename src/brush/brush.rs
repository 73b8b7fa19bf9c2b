//! Brush and draw-object types

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::Error;
use super::settings::ModelSettings;
use super::template::{TemplateId, TemplateLibrary};

/// Unique identifier for a brush in a `BrushLibrary`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrushId(pub u64);

/// Brush variant tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushKind {
    /// Places copies of object templates onto surfaces
    Object,
}

impl BrushKind {
    /// Every known brush kind
    pub fn all() -> &'static [BrushKind] {
        &[BrushKind::Object]
    }

    /// Type name shown in tool labels and stored in records
    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Object => "ObjectBrush",
        }
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrushKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "objectbrush" | "object" => Ok(BrushKind::Object),
            _ => Err(Error::InvalidBrushKind(s.to_string())),
        }
    }
}

/// One template entry of a brush
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawObject {
    pub template: TemplateId,
    /// Index into the owning brush's settings list
    pub settings_index: usize,
    pub enabled: bool,
}

impl DrawObject {
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            settings_index: 0,
            enabled: true,
        }
    }
}

/// A named set of templates plus the placement rules applied to them
#[derive(Clone, Debug)]
pub struct Brush {
    pub(crate) id: BrushId,
    pub name: String,
    kind: BrushKind,
    /// Template the draw objects are built from
    selected_object: Option<TemplateId>,
    /// Use the selected template's children instead of the template itself
    unpack: bool,
    /// Euler offset (degrees) added to surface-aligned rotations
    pub origin_rotation: Vec3,
    model_settings: Vec<ModelSettings>,
    draw_objects: Vec<DrawObject>,
    /// Variants substituted per stroke; not owned
    pub(crate) sub_brushes: Vec<BrushId>,
}

impl Brush {
    /// Create a brush with one default settings entry and no draw objects
    pub fn new(kind: BrushKind, name: impl Into<String>) -> Self {
        Self {
            id: BrushId(0),
            name: name.into(),
            kind,
            selected_object: None,
            unpack: false,
            origin_rotation: Vec3::new(90.0, 0.0, 0.0),
            model_settings: vec![ModelSettings::default()],
            draw_objects: Vec::new(),
            sub_brushes: Vec::new(),
        }
    }

    pub fn id(&self) -> BrushId {
        self.id
    }

    pub fn kind(&self) -> BrushKind {
        self.kind
    }

    pub fn selected_object(&self) -> Option<TemplateId> {
        self.selected_object
    }

    pub fn unpack(&self) -> bool {
        self.unpack
    }

    /// Change the source template; rebuilds draw objects when it differs
    pub fn set_selected_object(&mut self, template: Option<TemplateId>, templates: &TemplateLibrary) {
        if self.selected_object != template {
            self.selected_object = template;
            self.rebuild_draw_objects(templates);
        }
    }

    /// Toggle unpacking; rebuilds draw objects when it changes
    pub fn set_unpack(&mut self, unpack: bool, templates: &TemplateLibrary) {
        if self.unpack != unpack {
            self.unpack = unpack;
            self.rebuild_draw_objects(templates);
        }
    }

    /// Rebuild draw objects from the selected template.
    ///
    /// Unpacked brushes get one draw object per child template, otherwise the
    /// selected template itself. Every entry starts on settings 0, enabled.
    /// Brushes without a selected template keep their current list.
    pub fn rebuild_draw_objects(&mut self, templates: &TemplateLibrary) {
        let Some(selected) = self.selected_object else {
            return;
        };
        let sources: Vec<TemplateId> = if self.unpack {
            templates.get(selected).map(|t| t.children.clone()).unwrap_or_default()
        } else {
            vec![selected]
        };
        self.draw_objects = sources.into_iter().map(DrawObject::new).collect();
    }

    pub fn draw_objects(&self) -> &[DrawObject] {
        &self.draw_objects
    }

    pub fn draw_objects_mut(&mut self) -> &mut Vec<DrawObject> {
        &mut self.draw_objects
    }

    /// Replace draw objects, clamping their settings indices
    pub fn set_draw_objects(&mut self, draw_objects: Vec<DrawObject>) {
        self.draw_objects = draw_objects;
        self.clamp_settings_indices();
    }

    pub fn model_settings(&self) -> &[ModelSettings] {
        &self.model_settings
    }

    /// Direct access for configuration surfaces. Callers that shrink the list
    /// should follow with `clamp_settings_indices`; evaluation re-validates anyway.
    pub fn model_settings_mut(&mut self) -> &mut Vec<ModelSettings> {
        &mut self.model_settings
    }

    /// Names of all settings entries, in order
    pub fn settings_names(&self) -> Vec<&str> {
        self.model_settings.iter().map(|s| s.name.as_str()).collect()
    }

    /// Append a settings entry and return its index
    pub fn add_settings(&mut self, settings: ModelSettings) -> usize {
        self.model_settings.push(settings);
        self.model_settings.len() - 1
    }

    /// Remove a settings entry. The last remaining entry cannot be removed.
    pub fn remove_settings(&mut self, index: usize) -> Option<ModelSettings> {
        if self.model_settings.len() <= 1 || index >= self.model_settings.len() {
            return None;
        }
        let removed = self.model_settings.remove(index);
        self.clamp_settings_indices();
        Some(removed)
    }

    /// Drop every settings entry, leaving a single default one
    pub fn clear_settings(&mut self) {
        self.model_settings.clear();
        self.model_settings.push(ModelSettings::default());
        self.clamp_settings_indices();
    }

    /// Point a draw object at another settings entry
    pub fn set_settings_index(&mut self, draw_index: usize, settings_index: usize) -> Result<(), Error> {
        let len = self.model_settings.len();
        if settings_index >= len {
            return Err(Error::SettingsIndex { index: settings_index, len });
        }
        if let Some(draw) = self.draw_objects.get_mut(draw_index) {
            draw.settings_index = settings_index;
        }
        Ok(())
    }

    /// Reset out-of-range settings indices to 0. Returns how many were reset.
    pub fn clamp_settings_indices(&mut self) -> usize {
        let len = self.model_settings.len();
        if len == 0 {
            // Nothing to point at; resolve_settings_index reports no settings
            return 0;
        }
        let mut clamped = 0;
        for draw in &mut self.draw_objects {
            if draw.settings_index >= len {
                log::warn!(
                    "Brush '{}': settings index {} out of range ({} entries), using 0",
                    self.name, draw.settings_index, len
                );
                draw.settings_index = 0;
                clamped += 1;
            }
        }
        clamped
    }

    /// Settings index a draw object resolves to, tolerating a shrunk list
    pub fn resolve_settings_index(&self, draw: &DrawObject) -> Option<usize> {
        match self.model_settings.len() {
            0 => None,
            len if draw.settings_index < len => Some(draw.settings_index),
            _ => Some(0),
        }
    }

    /// Sub-brush references, in insertion order
    pub fn sub_brushes(&self) -> &[BrushId] {
        &self.sub_brushes
    }

    /// Copy configuration from another brush of the same kind.
    /// Identity, name and sub-brushes are kept.
    pub fn copy_settings_from(&mut self, other: &Brush) -> Result<(), Error> {
        if other.kind != self.kind {
            return Err(Error::InvalidBrushKind(other.kind.name().to_string()));
        }
        self.selected_object = other.selected_object;
        self.unpack = other.unpack;
        self.origin_rotation = other.origin_rotation;
        self.model_settings = other.model_settings.clone();
        self.draw_objects = other.draw_objects.clone();
        Ok(())
    }
}
