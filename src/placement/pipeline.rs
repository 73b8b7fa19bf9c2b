//! Placement pipeline
//!
//! Stages run in a fixed order; reordering them changes the output:
//!
//! 1. base transform from the hit point and the template
//! 2. placement normal (surface normal or world up)
//! 3. surface alignment (`rotate_by_mesh`), skipped when its probe misses
//! 4. snap onto the surface (`move_to_mesh`), rejects when its probe misses
//! 5. random offsets for position, rotation (Euler degrees) and scale
//! 6. fixed offsets, same order
//! 7. collider-name exclusion

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::brush::{ModelSettings, Template, TemplateId};
use crate::math::{euler_degrees, from_euler_degrees, look_rotation, Ray};
use super::exclusion::ExclusionFilter;
use super::random::RandomSource;
use super::surface::{SurfaceHit, SurfaceQuery};

/// Probe geometry used by the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Alignment probe starts this far above the hit point along the normal
    pub align_probe_height: f32,
    /// Snap and exclusion probes start this far above the position along the normal
    pub snap_probe_height: f32,
    /// Normal used when surface alignment is off
    pub world_up: Vec3,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            align_probe_height: 1.0,
            snap_probe_height: 2.0,
            world_up: Vec3::Y,
        }
    }
}

/// Why a candidate placement was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Snap probe found no surface
    NoSurface,
    /// Exclusion filter matched a collider
    Excluded,
    /// Draw object refers to an unknown template
    MissingTemplate,
    /// Brush has no settings entries
    NoSettings,
}

/// Final instance transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// An accepted candidate placement
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub template: TemplateId,
    pub transform: PlacementTransform,
    /// Normal the placement was aligned to
    pub normal: Vec3,
    /// Primary hit under the pointer
    pub source_hit: SurfaceHit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlacementOutcome {
    Accept(Placement),
    Reject(RejectReason),
}

impl PlacementOutcome {
    pub fn accepted(&self) -> Option<&Placement> {
        match self {
            PlacementOutcome::Accept(p) => Some(p),
            PlacementOutcome::Reject(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, PlacementOutcome::Accept(_))
    }
}

/// Per-frame inputs shared by every draw object of a stroke
pub struct PlacementContext<'a> {
    /// Euler offset (degrees) of the brush variant being painted
    pub origin_rotation: Vec3,
    pub surface: &'a dyn SurfaceQuery,
    /// Template names of the tool brush and its sub-brushes
    pub own_names: &'a [String],
}

/// Stateless transform evaluator
#[derive(Clone, Copy, Debug, Default)]
pub struct PlacementPipeline {
    config: PipelineConfig,
}

impl PlacementPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Evaluate one template against a surface hit
    pub fn evaluate(
        &self,
        template: &Template,
        settings: &ModelSettings,
        hit: &SurfaceHit,
        ctx: &PlacementContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PlacementOutcome {
        let mut position = hit.point + template.local_offset;
        let mut rotation = template.rotation;
        let mut scale = template.local_scale;

        let normal = if settings.rotate_by_mesh {
            hit.normal.normalize_or(self.config.world_up)
        } else {
            self.config.world_up
        };

        if settings.rotate_by_mesh {
            let probe = Ray::probe(hit.point, normal, self.config.align_probe_height);
            if let Some(aligned) = ctx.surface.cast(&probe) {
                let look = look_rotation(normal, self.config.world_up);
                rotation = from_euler_degrees(euler_degrees(look) + ctx.origin_rotation);
                position = rotation * (position - aligned.point) + aligned.point;
            }
        }

        if settings.move_to_mesh {
            let probe = Ray::probe(position, normal, self.config.snap_probe_height);
            match ctx.surface.cast(&probe) {
                Some(snapped) => position = snapped.point,
                None => return PlacementOutcome::Reject(RejectReason::NoSurface),
            }
        }

        position = settings.random_position.apply(position, rng);
        rotation = from_euler_degrees(settings.random_rotation.apply(euler_degrees(rotation), rng));
        scale = settings.random_scale.apply(scale, rng);

        position = settings.position_offset.apply(position);
        rotation = from_euler_degrees(settings.rotation_offset.apply(euler_degrees(rotation)));
        scale = settings.scale_offset.apply(scale);

        if settings.use_exclusion {
            let filter = ExclusionFilter::new(settings, ctx.own_names);
            if !filter.passes(hit, position, normal, self.config.snap_probe_height, ctx.surface) {
                return PlacementOutcome::Reject(RejectReason::Excluded);
            }
        }

        PlacementOutcome::Accept(Placement {
            template: template.id,
            transform: PlacementTransform { position, rotation, scale },
            normal,
            source_hit: hit.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{OffsetSettings, RandomOffsetSettings};
    use crate::math::Aabb;
    use crate::placement::{ColliderSet, SeededRandom};

    fn ground() -> ColliderSet {
        let mut set = ColliderSet::new();
        set.add_ground("Ground", 0.0);
        set
    }

    fn cast_down(surface: &ColliderSet, x: f32, z: f32) -> SurfaceHit {
        surface.cast(&Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)).unwrap()
    }

    fn flat_settings() -> ModelSettings {
        ModelSettings {
            rotate_by_mesh: false,
            ..Default::default()
        }
    }

    fn evaluate(
        settings: &ModelSettings,
        template: &Template,
        surface: &ColliderSet,
        hit: &SurfaceHit,
        own: &[String],
    ) -> PlacementOutcome {
        let ctx = PlacementContext {
            origin_rotation: Vec3::new(90.0, 0.0, 0.0),
            surface,
            own_names: own,
        };
        let mut rng = SeededRandom::new(1);
        PlacementPipeline::default().evaluate(template, settings, hit, &ctx, &mut rng)
    }

    #[test]
    fn test_base_transform() {
        let surface = ground();
        let hit = cast_down(&surface, 2.0, 3.0);
        let template = Template::new(TemplateId(0), "Post").with_offset(Vec3::new(0.0, 0.0, 1.0));
        let settings = ModelSettings { move_to_mesh: false, rotate_by_mesh: false, ..Default::default() };

        let outcome = evaluate(&settings, &template, &surface, &hit, &[]);
        let placement = outcome.accepted().unwrap();
        assert!((placement.transform.position - Vec3::new(2.0, 0.0, 4.0)).length() < 1e-4);
        assert_eq!(placement.transform.scale, Vec3::ONE);
        assert_eq!(placement.normal, Vec3::Y);
    }

    #[test]
    fn test_snap_onto_surface() {
        let surface = ground();
        let hit = cast_down(&surface, 0.0, 0.0);
        // Offset upward: snapping pulls it back down to the ground
        let template = Template::new(TemplateId(0), "Lamp").with_offset(Vec3::new(0.0, 1.0, 0.0));

        let placement = evaluate(&flat_settings(), &template, &surface, &hit, &[]);
        let p = placement.accepted().unwrap().transform.position;
        assert!((p - Vec3::ZERO).length() < 1e-4);
    }

    #[test]
    fn test_snap_miss_rejects() {
        let mut surface = ColliderSet::new();
        surface.add_box("Ledge", Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 0.0, 1.0)));
        let hit = cast_down(&surface, 0.0, 0.0);
        // Offset far off the ledge: nothing below
        let template = Template::new(TemplateId(0), "Crate").with_offset(Vec3::new(5.0, 0.0, 0.0));

        let outcome = evaluate(&flat_settings(), &template, &surface, &hit, &[]);
        assert_eq!(outcome, PlacementOutcome::Reject(RejectReason::NoSurface));
    }

    #[test]
    fn test_no_snap_ignores_probe() {
        let mut surface = ColliderSet::new();
        surface.add_box("Ledge", Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 0.0, 1.0)));
        let hit = cast_down(&surface, 0.0, 0.0);
        let template = Template::new(TemplateId(0), "Crate").with_offset(Vec3::new(5.0, 0.0, 0.0));
        let settings = ModelSettings { move_to_mesh: false, rotate_by_mesh: false, ..Default::default() };

        let outcome = evaluate(&settings, &template, &surface, &hit, &[]);
        let p = outcome.accepted().unwrap().transform.position;
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_align_on_flat_ground_with_default_origin() {
        let surface = ground();
        let hit = cast_down(&surface, 1.0, 1.0);
        let template = Template::new(TemplateId(0), "Tree");

        let outcome = evaluate(&ModelSettings::default(), &template, &surface, &hit, &[]);
        let t = outcome.accepted().unwrap().transform;
        // Looking up plus the default 90 degree origin cancels out
        assert!(t.rotation.angle_between(Quat::IDENTITY) < 1e-3);
        assert!((t.position - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-3);
    }

    #[test]
    fn test_align_to_wall_normal() {
        let mut surface = ColliderSet::new();
        surface.add_box("Wall", Aabb::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 5.0, 5.0)));
        // Hit the wall's -X face
        let hit = surface.cast(&Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X)).unwrap();
        assert_eq!(hit.normal, Vec3::NEG_X);

        let template = Template::new(TemplateId(0), "Sign");
        let settings = ModelSettings { move_to_mesh: false, ..Default::default() };
        let ctx = PlacementContext { origin_rotation: Vec3::ZERO, surface: &surface, own_names: &[] };
        let mut rng = SeededRandom::new(1);
        let outcome = PlacementPipeline::default().evaluate(&template, &settings, &hit, &ctx, &mut rng);

        let placement = outcome.accepted().unwrap();
        assert_eq!(placement.normal, Vec3::NEG_X);
        // With no origin offset the template's forward axis follows the normal
        let forward = placement.transform.rotation * Vec3::Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-3);
    }

    #[test]
    fn test_align_probe_miss_keeps_base() {
        // Downward-facing plane reported with an upward normal: the alignment
        // probe comes from behind the plane and misses
        let mut surface = ColliderSet::new();
        surface.add(
            "Ceiling",
            crate::placement::ColliderShape::Plane { point: Vec3::new(0.0, 5.0, 0.0), normal: Vec3::NEG_Y },
        );
        let hit = surface.cast(&Ray::new(Vec3::ZERO, Vec3::Y)).unwrap();
        let template = Template::new(TemplateId(0), "Lamp").with_rotation(Quat::from_rotation_y(0.5));
        let settings = ModelSettings { move_to_mesh: false, ..Default::default() };

        let ctx = PlacementContext { origin_rotation: Vec3::ZERO, surface: &surface, own_names: &[] };
        let mut rng = SeededRandom::new(1);
        let shifted = SurfaceHit { normal: Vec3::Y, ..hit.clone() };
        let outcome = PlacementPipeline::default().evaluate(&template, &settings, &shifted, &ctx, &mut rng);
        let t = outcome.accepted().unwrap().transform;
        assert!(t.rotation.angle_between(Quat::from_rotation_y(0.5)) < 1e-3);
        assert!((t.position - hit.point).length() < 1e-4);
    }

    #[test]
    fn test_fixed_offsets() {
        let surface = ground();
        let hit = cast_down(&surface, 0.0, 0.0);
        let template = Template::new(TemplateId(0), "Rock");
        let settings = ModelSettings {
            move_to_mesh: false,
            rotate_by_mesh: false,
            position_offset: OffsetSettings::new(Vec3::new(0.0, 0.25, 0.0)),
            rotation_offset: OffsetSettings::new(Vec3::new(0.0, 90.0, 0.0)),
            scale_offset: OffsetSettings::new(Vec3::splat(0.5)),
            ..Default::default()
        };

        let t = evaluate(&settings, &template, &surface, &hit, &[]).accepted().unwrap().transform;
        assert!((t.position - Vec3::new(0.0, 0.25, 0.0)).length() < 1e-4);
        assert!(t.rotation.angle_between(Quat::from_rotation_y(90f32.to_radians())) < 1e-3);
        // Scale offsets are additive
        assert!((t.scale - Vec3::splat(1.5)).length() < 1e-4);
    }

    #[test]
    fn test_random_position_within_range() {
        let surface = ground();
        let hit = cast_down(&surface, 0.0, 0.0);
        let template = Template::new(TemplateId(0), "Pebble");
        let settings = ModelSettings {
            move_to_mesh: false,
            rotate_by_mesh: false,
            random_position: RandomOffsetSettings::range(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 0.0, 0.5)),
            ..Default::default()
        };
        let ctx = PlacementContext { origin_rotation: Vec3::ZERO, surface: &surface, own_names: &[] };
        let pipeline = PlacementPipeline::default();
        let mut rng = SeededRandom::new(77);
        for _ in 0..200 {
            let outcome = pipeline.evaluate(&template, &settings, &hit, &ctx, &mut rng);
            let p = outcome.accepted().unwrap().transform.position;
            assert!(p.x >= -0.5 && p.x <= 0.5);
            assert!(p.z >= -0.5 && p.z <= 0.5);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_exclusion_rejects_exact_name() {
        let mut surface = ColliderSet::new();
        surface.add_ground("Water", 0.0);
        let hit = cast_down(&surface, 0.0, 0.0);
        let template = Template::new(TemplateId(0), "Reed");
        let settings = ModelSettings {
            use_exclusion: true,
            exclusion_names: vec!["Water".to_string()],
            ..flat_settings()
        };

        let outcome = evaluate(&settings, &template, &surface, &hit, &[]);
        assert_eq!(outcome, PlacementOutcome::Reject(RejectReason::Excluded));
    }

    #[test]
    fn test_exclusion_own_template_and_sentinel() {
        let mut surface = ColliderSet::new();
        surface.add_ground("Rock", 0.0);
        let hit = cast_down(&surface, 0.0, 0.0);
        let template = Template::new(TemplateId(0), "Rock");
        let own = vec!["Rock".to_string()];

        let mut settings = ModelSettings { use_exclusion: true, ..flat_settings() };
        let outcome = evaluate(&settings, &template, &surface, &hit, &own);
        assert_eq!(outcome, PlacementOutcome::Reject(RejectReason::Excluded));

        settings.exclusion_names.push(crate::brush::TURN_OFF_AUTO_COLLIDERS.to_string());
        let outcome = evaluate(&settings, &template, &surface, &hit, &own);
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_exclusion_disabled_ignores_names() {
        let mut surface = ColliderSet::new();
        surface.add_ground("Water", 0.0);
        let hit = cast_down(&surface, 0.0, 0.0);
        let settings = ModelSettings {
            use_exclusion: false,
            exclusion_names: vec!["Water".to_string()],
            ..flat_settings()
        };
        let outcome = evaluate(&settings, &Template::new(TemplateId(0), "Reed"), &surface, &hit, &[]);
        assert!(outcome.is_accepted());
    }
}
