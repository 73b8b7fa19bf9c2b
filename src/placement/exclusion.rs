//! Collider-name exclusion filter

use glam::Vec3;

use crate::brush::ModelSettings;
use crate::math::Ray;
use super::surface::{SurfaceHit, SurfaceQuery};

/// Blacklist of collider-name substrings for one settings bundle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExclusionFilter {
    names: Vec<String>,
}

impl ExclusionFilter {
    /// Build the blacklist: configured names, plus `own_names` unless the
    /// settings carry the auto-collider sentinel. Empty entries never match.
    pub fn new(settings: &ModelSettings, own_names: &[String]) -> Self {
        let mut names: Vec<String> = settings
            .exclusion_names
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect();
        if settings.auto_exclusions_enabled() {
            names.extend(own_names.iter().filter(|n| !n.is_empty()).cloned());
        }
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True if the collider name contains any blacklist entry
    pub fn blocks(&self, collider_name: &str) -> bool {
        self.names.iter().any(|n| collider_name.contains(n.as_str()))
    }

    /// Check the primary hit and the surface under the final position.
    /// A missing secondary hit passes.
    pub fn passes(
        &self,
        primary: &SurfaceHit,
        position: Vec3,
        normal: Vec3,
        probe_height: f32,
        surface: &dyn SurfaceQuery,
    ) -> bool {
        if self.blocks(&primary.collider_name) {
            return false;
        }
        match surface.cast(&Ray::probe(position, normal, probe_height)) {
            Some(below) => !self.blocks(&below.collider_name),
            None => true,
        }
    }
}
