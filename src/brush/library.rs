//! Brush registry and per-stroke variant selection

use std::collections::HashMap;

use crate::core::{Error, Result};
use crate::placement::RandomSource;
use super::brush::{Brush, BrushId, BrushKind};
use super::template::TemplateLibrary;

/// Owns every brush; sub-brushes reference each other by ID
#[derive(Clone, Debug, Default)]
pub struct BrushLibrary {
    brushes: HashMap<BrushId, Brush>,
    /// Insertion order, for stable listing
    order: Vec<BrushId>,
    next_id: u64,
}

impl BrushLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a brush from a kind tag. Unknown tags are a configuration error.
    pub fn create_brush(&mut self, kind: &str, name: impl Into<String>) -> Result<BrushId> {
        let kind: BrushKind = kind.parse()?;
        Ok(self.insert(Brush::new(kind, name)))
    }

    /// Take ownership of a brush, assigning it a fresh ID
    pub fn insert(&mut self, mut brush: Brush) -> BrushId {
        let id = BrushId(self.next_id);
        self.next_id += 1;
        brush.id = id;
        log::debug!("Registered brush '{}' as {:?}", brush.name, id);
        self.brushes.insert(id, brush);
        self.order.push(id);
        id
    }

    /// Remove a brush and drop every sub-brush reference to it
    pub fn remove(&mut self, id: BrushId) -> Option<Brush> {
        self.order.retain(|b| *b != id);
        let removed = self.brushes.remove(&id)?;
        for brush in self.brushes.values_mut() {
            brush.sub_brushes.retain(|s| *s != id);
        }
        Some(removed)
    }

    pub fn get(&self, id: BrushId) -> Option<&Brush> {
        self.brushes.get(&id)
    }

    pub fn get_mut(&mut self, id: BrushId) -> Option<&mut Brush> {
        self.brushes.get_mut(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Brush> {
        self.order
            .iter()
            .filter_map(|id| self.brushes.get(id))
            .find(|b| b.name == name)
    }

    /// All brushes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Brush> + '_ {
        self.order.iter().filter_map(|id| self.brushes.get(id))
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    /// Register `sub` as a variant of `parent`. Both must exist and share a kind.
    pub fn add_sub_brush(&mut self, parent: BrushId, sub: BrushId) -> Result<()> {
        let sub_kind = self.get(sub).ok_or(Error::BrushNotFound(sub))?.kind();
        let parent_brush = self.brushes.get_mut(&parent).ok_or(Error::BrushNotFound(parent))?;
        if parent_brush.kind() != sub_kind {
            return Err(Error::InvalidBrushKind(sub_kind.name().to_string()));
        }
        if parent != sub && !parent_brush.sub_brushes.contains(&sub) {
            parent_brush.sub_brushes.push(sub);
        }
        Ok(())
    }

    pub fn remove_sub_brush(&mut self, parent: BrushId, sub: BrushId) {
        if let Some(b) = self.brushes.get_mut(&parent) {
            b.sub_brushes.retain(|s| *s != sub);
        }
    }

    /// The brush followed by its live sub-brushes. Empty if `id` is unknown.
    pub fn members(&self, id: BrushId) -> Vec<BrushId> {
        let Some(brush) = self.get(id) else {
            return Vec::new();
        };
        let mut members = vec![id];
        for sub in &brush.sub_brushes {
            if self.brushes.contains_key(sub) {
                members.push(*sub);
            } else {
                log::warn!("Brush '{}': sub-brush {:?} no longer exists", brush.name, sub);
            }
        }
        members
    }

    /// Pick the brush variant used for this stroke frame, uniformly over
    /// the brush and all of its live sub-brushes.
    pub fn select_active(&self, id: BrushId, rng: &mut dyn RandomSource) -> Option<BrushId> {
        let members = self.members(id);
        match members.len() {
            0 => None,
            1 => Some(members[0]),
            n => Some(members[rng.pick(n)]),
        }
    }

    /// Template names of every draw object across the brush and its sub-brushes.
    /// Used to keep a brush from painting onto its own output.
    pub fn own_template_names(&self, id: BrushId, templates: &TemplateLibrary) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for member in self.members(id) {
            let Some(brush) = self.get(member) else { continue };
            for draw in brush.draw_objects() {
                if let Some(name) = templates.name_of(draw.template) {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            }
        }
        names
    }
}
