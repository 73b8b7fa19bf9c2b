//! Object templates that brushes instantiate

use std::collections::HashMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Unique identifier for a template in a `TemplateLibrary`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

/// A placeable object: name, local transform and child templates
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    /// Offset added to the surface hit point
    pub local_offset: Vec3,
    /// Starting rotation of placed instances
    pub rotation: Quat,
    pub local_scale: Vec3,
    /// Child templates, used when a brush unpacks this template
    #[serde(default)]
    pub children: Vec<TemplateId>,
}

impl Template {
    /// Create a template with identity transform
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            local_offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            local_scale: Vec3::ONE,
            children: Vec::new(),
        }
    }

    /// Set local offset (builder pattern)
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.local_offset = offset;
        self
    }

    /// Set rotation (builder pattern)
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set scale (builder pattern)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local_scale = scale;
        self
    }
}

/// Template registry indexed by ID and name
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    templates: HashMap<TemplateId, Template>,
    by_name: HashMap<String, TemplateId>,
    next_id: u32,
    default_template: Option<TemplateId>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template with a fresh ID. Returns the ID.
    pub fn add(&mut self, name: impl Into<String>) -> TemplateId {
        let id = TemplateId(self.next_id);
        self.next_id += 1;
        self.insert(Template::new(id, name));
        id
    }

    /// Insert a fully built template, replacing any with the same ID
    pub fn insert(&mut self, template: Template) {
        self.next_id = self.next_id.max(template.id.0 + 1);
        self.by_name.insert(template.name.clone(), template.id);
        self.templates.insert(template.id, template);
    }

    /// Add `child` under `parent`. Unknown parents are ignored.
    pub fn add_child(&mut self, parent: TemplateId, child: TemplateId) {
        if let Some(t) = self.templates.get_mut(&parent) {
            if !t.children.contains(&child) {
                t.children.push(child);
            }
        }
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(&id)
    }

    pub fn get_mut(&mut self, id: TemplateId) -> Option<&mut Template> {
        self.templates.get_mut(&id)
    }

    /// Like `get`, but a missing template is an error
    pub fn require(&self, id: TemplateId) -> Result<&Template> {
        self.templates.get(&id).ok_or(Error::TemplateNotFound(id))
    }

    /// Look up by name
    pub fn find(&self, name: &str) -> Option<&Template> {
        self.by_name.get(name).and_then(|id| self.templates.get(id))
    }

    /// Name of a template, if registered
    pub fn name_of(&self, id: TemplateId) -> Option<&str> {
        self.templates.get(&id).map(|t| t.name.as_str())
    }

    /// Template assigned to freshly initialized brushes
    pub fn default_template(&self) -> Option<TemplateId> {
        self.default_template
    }

    pub fn set_default_template(&mut self, id: Option<TemplateId>) {
        self.default_template = id;
    }

    /// All templates, sorted by ID
    pub fn templates(&self) -> Vec<&Template> {
        let mut all: Vec<_> = self.templates.values().collect();
        all.sort_by_key(|t| t.id);
        all
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let mut lib = TemplateLibrary::new();
        let rock = lib.add("Rock");
        let tree = lib.add("Tree");
        assert_ne!(rock, tree);
        assert_eq!(lib.find("Tree").map(|t| t.id), Some(tree));
        assert_eq!(lib.name_of(rock), Some("Rock"));
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn test_insert_advances_ids() {
        let mut lib = TemplateLibrary::new();
        lib.insert(Template::new(TemplateId(10), "Crate"));
        let next = lib.add("Barrel");
        assert_eq!(next, TemplateId(11));
    }

    #[test]
    fn test_children() {
        let mut lib = TemplateLibrary::new();
        let group = lib.add("Forest");
        let a = lib.add("Pine");
        let b = lib.add("Birch");
        lib.add_child(group, a);
        lib.add_child(group, b);
        lib.add_child(group, a);
        assert_eq!(lib.get(group).unwrap().children, vec![a, b]);
    }

    #[test]
    fn test_builder() {
        let t = Template::new(TemplateId(0), "Lamp")
            .with_offset(Vec3::new(0.0, 0.5, 0.0))
            .with_scale(Vec3::splat(2.0));
        assert_eq!(t.local_offset.y, 0.5);
        assert_eq!(t.local_scale, Vec3::splat(2.0));
        assert_eq!(t.rotation, Quat::IDENTITY);
    }
}
