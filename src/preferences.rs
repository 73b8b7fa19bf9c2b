//! Tool preferences, stored as JSON next to the project

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::core::Result;
use crate::placement::PipelineConfig;

/// User-level settings for the brush tool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Directory holding persisted brush records
    pub brushes_dir: PathBuf,
    /// Template definitions loaded at startup
    pub templates_file: PathBuf,
    /// Hold to drag-rotate instead of painting
    pub rotation_key: KeyCode,
    pub snap_probe_height: f32,
    pub align_probe_height: f32,
    pub world_up: Vec3,
    /// Origin rotation given to newly created brushes
    pub default_origin_rotation: Vec3,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            brushes_dir: PathBuf::from("assets/brushes"),
            templates_file: PathBuf::from("assets/templates.json"),
            rotation_key: KeyCode::KeyE,
            snap_probe_height: 2.0,
            align_probe_height: 1.0,
            world_up: Vec3::Y,
            default_origin_rotation: Vec3::new(90.0, 0.0, 0.0),
        }
    }
}

impl Preferences {
    /// Load preferences, writing the defaults first if the file does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let json = std::fs::read_to_string(path)?;
            let prefs = serde_json::from_str(&json)?;
            log::info!("Loaded preferences from {}", path.display());
            Ok(prefs)
        } else {
            let prefs = Self::default();
            prefs.save(path)?;
            log::info!("Created default preferences at {}", path.display());
            Ok(prefs)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Probe geometry for the placement pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            align_probe_height: self.align_probe_height,
            snap_probe_height: self.snap_probe_height,
            world_up: self.world_up.normalize_or(Vec3::Y),
        }
    }
}
