//! Ordered, toggleable stroke stages run after placement evaluation

/// A step the stroke controller runs over accepted placements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Drag-to-rotate while the rotation key is held
    EditRotation,
    /// Preview handles under the pointer
    DrawHandles,
    /// Instantiate gated placements into the scene
    Commit,
}

impl StageKind {
    pub fn name(self) -> &'static str {
        match self {
            StageKind::EditRotation => "edit_rotation",
            StageKind::DrawHandles => "draw_handles",
            StageKind::Commit => "commit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeStage {
    pub kind: StageKind,
    pub enabled: bool,
}

/// Stage list in execution order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrokeStages {
    stages: Vec<StrokeStage>,
}

impl Default for StrokeStages {
    fn default() -> Self {
        Self {
            stages: vec![
                StrokeStage { kind: StageKind::EditRotation, enabled: true },
                StrokeStage { kind: StageKind::DrawHandles, enabled: true },
                StrokeStage { kind: StageKind::Commit, enabled: true },
            ],
        }
    }
}

impl StrokeStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, kind: StageKind) -> bool {
        self.stages.iter().any(|s| s.kind == kind && s.enabled)
    }

    pub fn set_enabled(&mut self, kind: StageKind, enabled: bool) {
        for stage in self.stages.iter_mut().filter(|s| s.kind == kind) {
            if stage.enabled != enabled {
                log::debug!("Stroke stage '{}' {}", kind.name(), if enabled { "enabled" } else { "disabled" });
            }
            stage.enabled = enabled;
        }
    }

    /// Enabled stages, in order
    pub fn enabled(&self) -> impl Iterator<Item = StageKind> + '_ {
        self.stages.iter().filter(|s| s.enabled).map(|s| s.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrokeStage> + '_ {
        self.stages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let stages = StrokeStages::new();
        let kinds: Vec<_> = stages.enabled().collect();
        assert_eq!(kinds, vec![StageKind::EditRotation, StageKind::DrawHandles, StageKind::Commit]);
    }

    #[test]
    fn test_toggle_keeps_order() {
        let mut stages = StrokeStages::new();
        stages.set_enabled(StageKind::Commit, false);
        assert!(!stages.is_enabled(StageKind::Commit));
        stages.set_enabled(StageKind::DrawHandles, false);
        stages.set_enabled(StageKind::Commit, true);

        let kinds: Vec<_> = stages.enabled().collect();
        assert_eq!(kinds, vec![StageKind::EditRotation, StageKind::Commit]);
        assert_eq!(stages.iter().count(), 3);
    }
}
