//! Persisted shapes of brushes and templates

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::brush::{Brush, BrushKind, BrushLibrary, DrawObject, ModelSettings, Template, TemplateLibrary};
use crate::core::{Error, Result};
use crate::math::{euler_degrees, from_euler_degrees};

/// Current version of the brush record format
pub const BRUSH_RECORD_VERSION: u32 = 1;

/// Draw object, with its template referenced by name
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawObjectRecord {
    pub template: String,
    #[serde(default)]
    pub settings_index: usize,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// One brush as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushRecord {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    /// Brush kind name, e.g. "ObjectBrush"
    pub kind: String,
    #[serde(default)]
    pub unpack: bool,
    #[serde(default)]
    pub selected_object: Option<String>,
    #[serde(default = "origin_rotation_default")]
    pub origin_rotation: Vec3,
    #[serde(default)]
    pub settings: Vec<ModelSettings>,
    #[serde(default)]
    pub draw_objects: Vec<DrawObjectRecord>,
    /// Sub-brushes by brush name
    #[serde(default)]
    pub sub_brushes: Vec<String>,
}

fn origin_rotation_default() -> Vec3 {
    Vec3::new(90.0, 0.0, 0.0)
}

impl BrushRecord {
    /// Snapshot a brush. Draw objects must point at known templates.
    pub fn from_brush(brush: &Brush, brushes: &BrushLibrary, templates: &TemplateLibrary) -> Result<Self> {
        let selected_object = match brush.selected_object() {
            Some(id) => Some(templates.require(id)?.name.clone()),
            None => None,
        };
        let draw_objects = brush
            .draw_objects()
            .iter()
            .map(|d| {
                Ok(DrawObjectRecord {
                    template: templates.require(d.template)?.name.clone(),
                    settings_index: d.settings_index,
                    enabled: d.enabled,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let sub_brushes = brush
            .sub_brushes()
            .iter()
            .filter_map(|id| brushes.get(*id))
            .map(|b| b.name.clone())
            .collect();

        Ok(Self {
            version: BRUSH_RECORD_VERSION,
            name: brush.name.clone(),
            kind: brush.kind().name().to_string(),
            unpack: brush.unpack(),
            selected_object,
            origin_rotation: brush.origin_rotation,
            settings: brush.model_settings().to_vec(),
            draw_objects,
            sub_brushes,
        })
    }

    /// Rebuild a brush. Sub-brush names are resolved by the caller once
    /// every record is loaded; unknown template names are dropped with a warning.
    pub fn to_brush(&self, templates: &TemplateLibrary) -> Result<Brush> {
        if self.name.is_empty() {
            return Err(Error::InvalidStoreEntry("brush record without a name".to_string()));
        }
        let kind: BrushKind = self.kind.parse()?;
        let mut brush = Brush::new(kind, self.name.clone());
        brush.origin_rotation = self.origin_rotation;
        brush.set_unpack(self.unpack, templates);

        if let Some(name) = &self.selected_object {
            match templates.find(name) {
                Some(t) => brush.set_selected_object(Some(t.id), templates),
                None => log::warn!("Brush '{}': unknown source template '{}'", self.name, name),
            }
        }

        if !self.settings.is_empty() {
            *brush.model_settings_mut() = self.settings.clone();
        }

        let draw_objects = self
            .draw_objects
            .iter()
            .filter_map(|d| match templates.find(&d.template) {
                Some(t) => Some(DrawObject {
                    template: t.id,
                    settings_index: d.settings_index,
                    enabled: d.enabled,
                }),
                None => {
                    log::warn!("Brush '{}': dropping draw object for unknown template '{}'", self.name, d.template);
                    None
                }
            })
            .collect();
        brush.set_draw_objects(draw_objects);
        Ok(brush)
    }
}

/// One template definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    #[serde(default)]
    pub offset: Vec3,
    /// Euler degrees
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "scale_default")]
    pub scale: Vec3,
    /// Child templates by name
    #[serde(default)]
    pub children: Vec<String>,
}

fn scale_default() -> Vec3 {
    Vec3::ONE
}

/// Template definitions file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Template given to fresh brushes
    #[serde(default)]
    pub default: Option<String>,
    pub templates: Vec<TemplateRecord>,
}

impl TemplateFile {
    /// Build a library. Children must be defined in the same file.
    pub fn to_library(&self) -> Result<TemplateLibrary> {
        let mut library = TemplateLibrary::new();
        for record in &self.templates {
            if library.find(&record.name).is_some() {
                return Err(Error::InvalidStoreEntry(format!("duplicate template '{}'", record.name)));
            }
            let id = library.add(record.name.clone());
            if let Some(t) = library.get_mut(id) {
                t.local_offset = record.offset;
                t.rotation = from_euler_degrees(record.rotation);
                t.local_scale = record.scale;
            }
        }
        for record in &self.templates {
            let Some(parent) = library.find(&record.name).map(|t| t.id) else { continue };
            for child in &record.children {
                let child = library
                    .find(child)
                    .map(|t| t.id)
                    .ok_or_else(|| Error::InvalidStoreEntry(format!("unknown child template '{child}'")))?;
                library.add_child(parent, child);
            }
        }
        if let Some(name) = &self.default {
            let id = library
                .find(name)
                .map(|t| t.id)
                .ok_or_else(|| Error::InvalidStoreEntry(format!("unknown default template '{name}'")))?;
            library.set_default_template(Some(id));
        }
        Ok(library)
    }

    pub fn from_library(library: &TemplateLibrary) -> Self {
        let record = |t: &Template| TemplateRecord {
            name: t.name.clone(),
            offset: t.local_offset,
            rotation: euler_degrees(t.rotation),
            scale: t.local_scale,
            children: t
                .children
                .iter()
                .filter_map(|c| library.name_of(*c).map(str::to_string))
                .collect(),
        };
        Self {
            default: library.default_template().and_then(|id| library.name_of(id)).map(str::to_string),
            templates: library.templates().into_iter().map(record).collect(),
        }
    }
}

/// Stock templates used when no template file exists
pub fn default_templates() -> TemplateFile {
    let simple = |name: &str| TemplateRecord {
        name: name.to_string(),
        offset: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        children: Vec::new(),
    };
    TemplateFile {
        default: Some("Cube".to_string()),
        templates: vec![simple("Cube"), simple("Sphere"), simple("Cylinder")],
    }
}
