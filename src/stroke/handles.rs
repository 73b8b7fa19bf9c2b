//! Preview handles drawn under the pointer while painting

use glam::Vec3;

use crate::math::from_euler_degrees;
use crate::placement::Placement;

/// Length of the axis and rotation lines
pub const HANDLE_RADIUS: f32 = 0.45;
/// Radius of the rotation-edit ring
pub const ROTATION_EDIT_RADIUS: f32 = 0.6;

/// Linear RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl HandleColor {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const FAINT: Self = Self::rgba(1.0, 1.0, 1.0, 0.3);
    pub const SOFT: Self = Self::rgba(1.0, 1.0, 1.0, 0.7);
    // Axis colors, lightened towards white
    pub const AXIS_X: Self = Self::rgba(1.0, 0.3, 0.3, 1.0);
    pub const AXIS_Y: Self = Self::rgba(0.3, 1.0, 0.3, 1.0);
    pub const AXIS_Z: Self = Self::rgba(0.3, 0.3, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Debug-drawing backend
pub trait HandleSink {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: HandleColor);

    /// Wire arc around `normal` starting at direction `from`
    fn draw_arc(&mut self, center: Vec3, normal: Vec3, from: Vec3, angle_degrees: f32, radius: f32, color: HandleColor);
}

/// Normal line, rotation line, three axis lines and a ring around the normal
pub fn draw_placement_handles(placement: &Placement, sink: &mut dyn HandleSink) {
    let position = placement.transform.position;
    let normal = placement.normal;
    let rotation = placement.transform.rotation;

    sink.draw_line(position, position - normal * (HANDLE_RADIUS * 1.5), HandleColor::WHITE);
    sink.draw_line(position, position + rotation * Vec3::Z * HANDLE_RADIUS, HandleColor::FAINT);
    sink.draw_line(position, position + Vec3::Y * HANDLE_RADIUS, HandleColor::AXIS_Y);
    sink.draw_line(position, position + Vec3::X * HANDLE_RADIUS, HandleColor::AXIS_X);
    sink.draw_line(position, position + Vec3::Z * HANDLE_RADIUS, HandleColor::AXIS_Z);

    let from = Vec3::ONE - normal.abs();
    sink.draw_arc(position, normal, from, 360.0, HANDLE_RADIUS, HandleColor::WHITE);
}

/// Ring and indicator line showing the current rotation offset
pub fn draw_rotation_edit_handles(placement: &Placement, rotation_offset: Vec3, sink: &mut dyn HandleSink) {
    let position = placement.transform.position;
    let from = from_euler_degrees(rotation_offset) * (Vec3::X * ROTATION_EDIT_RADIUS);

    sink.draw_arc(position, placement.normal, from, 360.0, ROTATION_EDIT_RADIUS, HandleColor::FAINT);
    sink.draw_line(position, position + from, HandleColor::SOFT);
}

/// A recorded handle primitive
#[derive(Clone, Debug, PartialEq)]
pub enum HandleShape {
    Line { from: Vec3, to: Vec3, color: HandleColor },
    Arc { center: Vec3, normal: Vec3, from: Vec3, angle_degrees: f32, radius: f32, color: HandleColor },
}

/// Sink that stores everything drawn, for headless tools and tests
#[derive(Clone, Debug, Default)]
pub struct HandleRecorder {
    pub shapes: Vec<HandleShape>,
}

impl HandleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> usize {
        self.shapes.iter().filter(|s| matches!(s, HandleShape::Line { .. })).count()
    }

    pub fn arcs(&self) -> usize {
        self.shapes.iter().filter(|s| matches!(s, HandleShape::Arc { .. })).count()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl HandleSink for HandleRecorder {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: HandleColor) {
        self.shapes.push(HandleShape::Line { from, to, color });
    }

    fn draw_arc(&mut self, center: Vec3, normal: Vec3, from: Vec3, angle_degrees: f32, radius: f32, color: HandleColor) {
        self.shapes.push(HandleShape::Arc { center, normal, from, angle_degrees, radius, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use crate::brush::TemplateId;
    use crate::placement::{ColliderId, PlacementTransform, SurfaceHit};

    fn placement() -> Placement {
        Placement {
            template: TemplateId(0),
            transform: PlacementTransform {
                position: Vec3::new(1.0, 0.0, 0.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
            normal: Vec3::Y,
            source_hit: SurfaceHit {
                point: Vec3::new(1.0, 0.0, 0.0),
                normal: Vec3::Y,
                collider_id: ColliderId(0),
                collider_name: "Ground".to_string(),
            },
        }
    }

    #[test]
    fn test_placement_handles() {
        let mut rec = HandleRecorder::new();
        draw_placement_handles(&placement(), &mut rec);
        assert_eq!(rec.lines(), 5);
        assert_eq!(rec.arcs(), 1);

        // Normal line points into the surface
        match &rec.shapes[0] {
            HandleShape::Line { to, .. } => assert!(to.y < 0.0),
            other => panic!("expected line, got {other:?}"),
        }
        // Ring starts perpendicular to the normal
        match rec.shapes.last().unwrap() {
            HandleShape::Arc { from, .. } => assert_eq!(*from, Vec3::new(1.0, 0.0, 1.0)),
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn test_rotation_edit_indicator_follows_offset() {
        let mut rec = HandleRecorder::new();
        draw_rotation_edit_handles(&placement(), Vec3::new(0.0, 90.0, 0.0), &mut rec);
        assert_eq!(rec.arcs(), 1);
        match &rec.shapes[1] {
            HandleShape::Line { from, to, .. } => {
                let dir = (*to - *from).normalize();
                // +X yawed by 90 degrees points along -Z
                assert!((dir - Vec3::NEG_Z).length() < 1e-4);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }
}
