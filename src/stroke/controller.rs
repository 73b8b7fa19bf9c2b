//! Per-frame stroke driver
//!
//! One `update` call per host input event: probe the surface under the
//! pointer, pick the brush variant for the frame, evaluate every enabled draw
//! object, then run the enabled stroke stages over the accepted placements.

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::brush::{BrushId, BrushLibrary, TemplateLibrary};
use crate::core::{FrameInput, InputEvent};
use crate::placement::{
    PlacementContext, PlacementOutcome, PlacementPipeline, RandomSource, RejectReason, SurfaceQuery,
};
use crate::preferences::Preferences;
use crate::scene::{NodeId, SceneGraph};

use super::handles::{draw_placement_handles, draw_rotation_edit_handles, HandleSink};
use super::placer::InstancePlacer;
use super::stage::{StageKind, StrokeStages};

/// Label shown when no brush is active
pub const NO_BRUSH_LABEL: &str = "No selected brushes";

/// Interaction mode of the tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Idle,
    /// Rotation key held: drags rotate instead of painting
    RotationEdit,
}

/// Host collaborators for one update
pub struct FrameContext<'a> {
    pub brushes: &'a mut BrushLibrary,
    pub templates: &'a TemplateLibrary,
    pub surface: &'a dyn SurfaceQuery,
    pub scene: &'a mut dyn SceneGraph,
    pub rng: &'a mut dyn RandomSource,
    pub handles: Option<&'a mut dyn HandleSink>,
}

/// Result of evaluating one draw object
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOutcome {
    /// Index into the variant's draw objects
    pub draw_index: usize,
    pub settings_index: Option<usize>,
    pub outcome: PlacementOutcome,
}

/// What one update did
#[derive(Clone, Debug, Default)]
pub struct StrokeReport {
    /// Brush variant painted this frame
    pub variant: Option<BrushId>,
    pub outcomes: Vec<DrawOutcome>,
    pub committed: Vec<NodeId>,
}

impl StrokeReport {
    pub fn accepted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_accepted()).count()
    }
}

pub struct StrokeController {
    state: ControllerState,
    stages: StrokeStages,
    brush: Option<BrushId>,
    rotation_key: KeyCode,
    pipeline: PlacementPipeline,
    placer: InstancePlacer,
}

impl StrokeController {
    pub fn new(pipeline: PlacementPipeline, rotation_key: KeyCode) -> Self {
        Self {
            state: ControllerState::Idle,
            stages: StrokeStages::default(),
            brush: None,
            rotation_key,
            pipeline,
            placer: InstancePlacer::new(),
        }
    }

    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self::new(PlacementPipeline::new(prefs.pipeline_config()), prefs.rotation_key)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn stages(&self) -> &StrokeStages {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut StrokeStages {
        &mut self.stages
    }

    pub fn brush(&self) -> Option<BrushId> {
        self.brush
    }

    /// Make `brush` the painting brush. Switching brushes resets the tool state.
    pub fn set_brush(&mut self, brush: Option<BrushId>) {
        if self.brush != brush {
            self.deactivate();
            self.brush = brush;
        }
    }

    pub fn placer(&self) -> &InstancePlacer {
        &self.placer
    }

    /// Tool became inactive: leave rotation editing
    pub fn deactivate(&mut self) {
        if self.state == ControllerState::RotationEdit {
            log::debug!("Rotation edit cancelled");
        }
        self.state = ControllerState::Idle;
    }

    /// Whether there is a brush to paint with
    pub fn is_available(&self, brushes: &BrushLibrary) -> bool {
        self.brush.and_then(|id| brushes.get(id)).is_some()
    }

    pub fn tool_label(&self, brushes: &BrushLibrary) -> String {
        match self.brush.and_then(|id| brushes.get(id)) {
            Some(brush) => brush.kind().name().to_string(),
            None => NO_BRUSH_LABEL.to_string(),
        }
    }

    /// Run one evaluation cycle
    pub fn update(&mut self, input: &mut FrameInput, ctx: &mut FrameContext<'_>) -> StrokeReport {
        let mut report = StrokeReport::default();
        let Some(root) = self.brush.filter(|id| ctx.brushes.get(*id).is_some()) else {
            return report;
        };

        self.handle_rotation_key(input);

        let Some(variant) = ctx.brushes.select_active(root, ctx.rng) else {
            return report;
        };
        report.variant = Some(variant);
        let own_names = ctx.brushes.own_template_names(root, ctx.templates);

        let Some(brush) = ctx.brushes.get_mut(variant) else {
            return report;
        };
        // The settings list may have shrunk since the previous frame
        brush.clamp_settings_indices();

        let Some(hit) = ctx.surface.cast(&input.pointer_ray) else {
            return report;
        };

        let brush = &*brush;
        let placement_ctx = PlacementContext {
            origin_rotation: brush.origin_rotation,
            surface: ctx.surface,
            own_names: &own_names,
        };
        for (draw_index, draw) in brush.draw_objects().iter().enumerate() {
            if !draw.enabled {
                continue;
            }
            let settings_index = brush.resolve_settings_index(draw);
            let outcome = match (ctx.templates.get(draw.template), settings_index) {
                (None, _) => PlacementOutcome::Reject(RejectReason::MissingTemplate),
                (Some(_), None) => PlacementOutcome::Reject(RejectReason::NoSettings),
                (Some(template), Some(index)) => self.pipeline.evaluate(
                    template,
                    &brush.model_settings()[index],
                    &hit,
                    &placement_ctx,
                    ctx.rng,
                ),
            };
            if let PlacementOutcome::Reject(reason) = &outcome {
                log::debug!("Brush '{}': draw object {} rejected ({:?})", brush.name, draw_index, reason);
            }
            report.outcomes.push(DrawOutcome { draw_index, settings_index, outcome });
        }

        let stages: Vec<StageKind> = self.stages.enabled().collect();
        for stage in stages {
            match stage {
                StageKind::EditRotation => {
                    if self.state == ControllerState::RotationEdit {
                        edit_rotation(ctx.brushes, variant, &report.outcomes, input.pointer_delta);
                    }
                }
                StageKind::DrawHandles => self.draw_handles(ctx, variant, &report.outcomes),
                StageKind::Commit => {
                    if self.state == ControllerState::Idle && input.event.is_press_or_drag() {
                        report.committed = self.commit(ctx, variant, &report.outcomes);
                    }
                }
            }
        }

        report
    }

    /// Apply rotation-key transitions. Only runs while the edit stage is enabled.
    fn handle_rotation_key(&mut self, input: &mut FrameInput) {
        if !self.stages.is_enabled(StageKind::EditRotation) {
            if self.state == ControllerState::RotationEdit {
                log::debug!("Rotation edit stage disabled, leaving edit");
                self.state = ControllerState::Idle;
            }
            return;
        }
        match input.event {
            InputEvent::KeyDown(key) | InputEvent::KeyRepeat(key) if key == self.rotation_key => {
                // Keep the host from running its own binding for this key
                input.consume();
                if input.event == InputEvent::KeyDown(key) && self.state == ControllerState::Idle {
                    log::debug!("Rotation edit started");
                    self.state = ControllerState::RotationEdit;
                }
            }
            InputEvent::KeyUp(key) if key == self.rotation_key && self.state == ControllerState::RotationEdit => {
                log::debug!("Rotation edit finished");
                self.state = ControllerState::Idle;
            }
            _ => {}
        }
    }

    fn draw_handles(&self, ctx: &mut FrameContext<'_>, variant: BrushId, outcomes: &[DrawOutcome]) {
        let Some(sink) = ctx.handles.as_deref_mut() else {
            return;
        };
        let Some(brush) = ctx.brushes.get(variant) else {
            return;
        };
        for drawn in outcomes {
            let Some(placement) = drawn.outcome.accepted() else { continue };
            draw_placement_handles(placement, sink);
            if self.state == ControllerState::RotationEdit {
                if let Some(settings) = drawn.settings_index.and_then(|i| brush.model_settings().get(i)) {
                    draw_rotation_edit_handles(placement, settings.rotation_offset.offset, sink);
                }
            }
        }
    }

    /// Instantiate every accepted placement that passes its random-set gate
    fn commit(&mut self, ctx: &mut FrameContext<'_>, variant: BrushId, outcomes: &[DrawOutcome]) -> Vec<NodeId> {
        let mut committed = Vec::new();
        let Some(brush) = ctx.brushes.get(variant) else {
            return committed;
        };
        for drawn in outcomes {
            let Some(placement) = drawn.outcome.accepted() else { continue };
            let Some(settings) = drawn.settings_index.and_then(|i| brush.model_settings().get(i)) else {
                continue;
            };
            if settings.random_set {
                let draw = ctx.rng.value();
                let percent = settings.random_set_percent;
                // Zero never commits, even on a zero draw
                if !(percent > 0.0 && draw <= percent) {
                    continue;
                }
            }
            let Some(template) = ctx.templates.get(placement.template) else { continue };
            let id = self.placer.place(ctx.scene, template, placement, brush.selected_object());
            log::debug!(
                "Committed '{}' at {:?} (brush '{}')",
                template.name, placement.transform.position, brush.name
            );
            committed.push(id);
        }
        committed
    }
}

/// Larger-magnitude pointer axis, vertical on ties
fn drag_amount(delta: Vec2) -> f32 {
    if delta.x.abs() > delta.y.abs() { delta.x } else { delta.y }
}

/// Force-enable the rotation offset of every settings entry behind an accepted
/// placement, then add the frame's drag along the placement normal, once per entry
fn edit_rotation(brushes: &mut BrushLibrary, variant: BrushId, outcomes: &[DrawOutcome], delta: Vec2) {
    let Some(brush) = brushes.get_mut(variant) else {
        return;
    };
    let amount = drag_amount(delta);

    let mut touched: Vec<(usize, Vec3)> = Vec::new();
    for drawn in outcomes {
        let (Some(index), Some(placement)) = (drawn.settings_index, drawn.outcome.accepted()) else {
            continue;
        };
        if !touched.iter().any(|(i, _)| *i == index) {
            touched.push((index, placement.normal));
        }
    }

    for (index, normal) in touched {
        if let Some(settings) = brush.model_settings_mut().get_mut(index) {
            settings.rotation_offset.enabled = true;
            if amount != 0.0 {
                settings.rotation_offset.offset += normal * amount;
            }
        }
    }
}
