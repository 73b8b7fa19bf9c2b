//! Surface ray queries

use glam::Vec3;

use crate::math::{Aabb, Ray};

/// Identifier of a collider in the host scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub u64);

/// Result of a ray probe against scene geometry
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub collider_id: ColliderId,
    pub collider_name: String,
}

/// Ray-cast access to scene geometry
pub trait SurfaceQuery {
    /// Closest hit along the ray, if any
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// Collider geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Box(Aabb),
    /// Infinite one-sided plane
    Plane { point: Vec3, normal: Vec3 },
}

/// A named collider
#[derive(Clone, Debug)]
pub struct Collider {
    pub id: ColliderId,
    pub name: String,
    pub shape: ColliderShape,
}

impl Collider {
    /// Distance and normal of the ray's hit against this collider
    fn hit(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match self.shape {
            ColliderShape::Box(aabb) => ray.hit_aabb(&aabb),
            ColliderShape::Plane { point, normal } => {
                let normal = normal.normalize_or(Vec3::Y);
                ray.intersects_plane(point, normal).map(|t| (t, normal))
            }
        }
    }
}

/// Simple in-memory collider scene
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Vec<Collider>,
    next_id: u64,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider and return its ID
    pub fn add(&mut self, name: impl Into<String>, shape: ColliderShape) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, name: name.into(), shape });
        id
    }

    /// Add an axis-aligned box
    pub fn add_box(&mut self, name: impl Into<String>, aabb: Aabb) -> ColliderId {
        self.add(name, ColliderShape::Box(aabb))
    }

    /// Add an upward-facing ground plane at height `y`
    pub fn add_ground(&mut self, name: impl Into<String>, y: f32) -> ColliderId {
        self.add(name, ColliderShape::Plane { point: Vec3::new(0.0, y, 0.0), normal: Vec3::Y })
    }

    pub fn remove(&mut self, id: ColliderId) {
        self.colliders.retain(|c| c.id != id);
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SurfaceQuery for ColliderSet {
    fn cast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.colliders
            .iter()
            .filter_map(|c| c.hit(ray).map(|(t, normal)| (t, normal, c)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, normal, c)| SurfaceHit {
                point: ray.at(t),
                normal,
                collider_id: c.id,
                collider_name: c.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_hit() {
        let mut set = ColliderSet::new();
        let ground = set.add_ground("Ground", 0.0);
        let hit = set.cast(&Ray::new(Vec3::new(3.0, 10.0, -2.0), Vec3::NEG_Y)).unwrap();
        assert_eq!(hit.collider_id, ground);
        assert_eq!(hit.collider_name, "Ground");
        assert!((hit.point - Vec3::new(3.0, 0.0, -2.0)).length() < 1e-4);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_closest_hit_wins() {
        let mut set = ColliderSet::new();
        set.add_ground("Ground", 0.0);
        let rock = set.add_box("Rock", Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0)));
        let hit = set.cast(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y)).unwrap();
        assert_eq!(hit.collider_id, rock);
        assert!((hit.point.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_miss() {
        let mut set = ColliderSet::new();
        set.add_ground("Ground", 0.0);
        assert!(set.cast(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y)).is_none());
    }

    #[test]
    fn test_remove() {
        let mut set = ColliderSet::new();
        let id = set.add_ground("Ground", 0.0);
        set.remove(id);
        assert!(set.is_empty());
        assert!(set.get(id).is_none());
    }
}
