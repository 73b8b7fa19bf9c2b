//! Placement rule bundles applied to draw objects

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::placement::RandomSource;

/// Exclusion entry that turns off automatic exclusion of the brush's own templates
pub const TURN_OFF_AUTO_COLLIDERS: &str = "$TurnOffAutoColliders";

/// A fixed vector added to position, rotation (Euler degrees) or scale
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetSettings {
    pub enabled: bool,
    pub offset: Vec3,
}

impl OffsetSettings {
    pub fn new(offset: Vec3) -> Self {
        Self { enabled: true, offset }
    }

    /// Add the offset when enabled
    pub fn apply(&self, value: Vec3) -> Vec3 {
        if self.enabled { value + self.offset } else { value }
    }
}

/// How a random offset is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomMode {
    /// One uniform value per axis within `[min, max]`
    #[default]
    Range,
    /// One whole vector picked from a candidate list
    Between,
}

/// Random offset rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomOffsetSettings {
    pub enabled: bool,
    pub mode: RandomMode,
    pub min: Vec3,
    pub max: Vec3,
    pub candidates: Vec<Vec3>,
}

impl Default for RandomOffsetSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: RandomMode::Range,
            min: Vec3::NEG_ONE,
            max: Vec3::ONE,
            candidates: Vec::new(),
        }
    }
}

impl RandomOffsetSettings {
    /// Enabled range rule
    pub fn range(min: Vec3, max: Vec3) -> Self {
        Self {
            enabled: true,
            mode: RandomMode::Range,
            min,
            max,
            ..Default::default()
        }
    }

    /// Enabled candidate-list rule
    pub fn between(candidates: Vec<Vec3>) -> Self {
        Self {
            enabled: true,
            mode: RandomMode::Between,
            candidates,
            ..Default::default()
        }
    }

    /// Draw an offset. `None` when disabled or when Between has no candidates.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Option<Vec3> {
        if !self.enabled {
            return None;
        }
        match self.mode {
            RandomMode::Range => Some(Vec3::new(
                rng.range(self.min.x, self.max.x),
                rng.range(self.min.y, self.max.y),
                rng.range(self.min.z, self.max.z),
            )),
            RandomMode::Between => {
                if self.candidates.is_empty() {
                    None
                } else {
                    Some(self.candidates[rng.pick(self.candidates.len())])
                }
            }
        }
    }

    /// Add a freshly drawn offset to `value`
    pub fn apply(&self, value: Vec3, rng: &mut dyn RandomSource) -> Vec3 {
        match self.sample(rng) {
            Some(offset) => value + offset,
            None => value,
        }
    }
}

/// Rule bundle shared by one or more draw objects of a brush
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub name: String,
    /// Snap the placement onto the surface below
    pub move_to_mesh: bool,
    /// Align the placement to the surface normal
    pub rotate_by_mesh: bool,

    pub position_offset: OffsetSettings,
    pub rotation_offset: OffsetSettings,
    pub scale_offset: OffsetSettings,

    pub random_position: RandomOffsetSettings,
    pub random_rotation: RandomOffsetSettings,
    pub random_scale: RandomOffsetSettings,

    /// Commit only a fraction of accepted placements
    pub random_set: bool,
    /// Commit probability in `[0, 1]` when `random_set` is on
    pub random_set_percent: f32,

    pub use_exclusion: bool,
    /// Collider-name substrings that block placement
    pub exclusion_names: Vec<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: "Settings".to_string(),
            move_to_mesh: true,
            rotate_by_mesh: true,
            position_offset: OffsetSettings::default(),
            rotation_offset: OffsetSettings::default(),
            scale_offset: OffsetSettings::default(),
            random_position: RandomOffsetSettings::default(),
            random_rotation: RandomOffsetSettings::default(),
            random_scale: RandomOffsetSettings::default(),
            random_set: false,
            random_set_percent: 1.0,
            use_exclusion: false,
            exclusion_names: Vec::new(),
        }
    }
}

impl ModelSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the commit probability, clamped to `[0, 1]`
    pub fn set_random_set_percent(&mut self, percent: f32) {
        self.random_set_percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) };
    }

    /// Whether the brush's own template names are added to the exclusion list
    pub fn auto_exclusions_enabled(&self) -> bool {
        !self.exclusion_names.iter().any(|n| n == TURN_OFF_AUTO_COLLIDERS)
    }
}
