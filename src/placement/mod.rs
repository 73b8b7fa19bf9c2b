//! Placement pipeline: turns a surface hit into a candidate instance transform.

pub mod random;
pub mod surface;
pub mod exclusion;
pub mod pipeline;

pub use random::{RandomSource, SeededRandom};
pub use surface::{Collider, ColliderId, ColliderSet, ColliderShape, SurfaceHit, SurfaceQuery};
pub use exclusion::ExclusionFilter;
pub use pipeline::{
    Placement, PlacementContext, PlacementOutcome, PlacementPipeline, PlacementTransform,
    PipelineConfig, RejectReason,
};
