//! Ray type and operations

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Probe ray starting `height` above `point` along `normal`, pointing back down `-normal`
    pub fn probe(point: Vec3, normal: Vec3, height: f32) -> Self {
        let normal = normal.normalize_or(Vec3::Y);
        Ray::new(point + normal * height, -normal)
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Entry distance and outward face normal of the AABB face the ray enters through.
    /// Rays starting inside the box report no hit.
    pub fn hit_aabb(&self, aabb: &Aabb) -> Option<(f32, Vec3)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;
        let t_min = t1.min(t2);

        let (t_near, _) = self.intersects_aabb(aabb)?;
        if aabb.contains_point(self.origin) {
            return None;
        }

        // Entry face is the slab with the largest near distance
        let normal = if t_min.x >= t_min.y && t_min.x >= t_min.z {
            Vec3::new(-self.direction.x.signum(), 0.0, 0.0)
        } else if t_min.y >= t_min.z {
            Vec3::new(0.0, -self.direction.y.signum(), 0.0)
        } else {
            Vec3::new(0.0, 0.0, -self.direction.z.signum())
        };
        Some((t_near, normal))
    }

    /// Ray-plane intersection, front faces only
    pub fn intersects_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom >= -1e-6 {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_probe() {
        let ray = Ray::probe(Vec3::new(1.0, 0.0, 1.0), Vec3::Y, 2.0);
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(ray.direction, Vec3::NEG_Y);
    }

    #[test]
    fn test_intersects_aabb_hit() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.intersects_aabb(&aabb);
        assert!(hit.is_some());
        let (t_near, t_far) = hit.unwrap();
        assert!((t_near - 2.0).abs() < 0.001);
        assert!((t_far - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_intersects_aabb_miss() {
        let ray = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_hit_aabb_top_face() {
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::NEG_Y);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let (t, normal) = ray.hit_aabb(&aabb).unwrap();
        assert!((t - 4.0).abs() < 0.001);
        assert_eq!(normal, Vec3::Y);
    }

    #[test]
    fn test_hit_aabb_side_face() {
        let ray = Ray::new(Vec3::new(-3.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let (_, normal) = ray.hit_aabb(&aabb).unwrap();
        assert_eq!(normal, Vec3::NEG_X);
    }

    #[test]
    fn test_hit_aabb_from_inside() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.hit_aabb(&aabb).is_none());
    }

    #[test]
    fn test_intersects_plane() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y);
        let t = ray.intersects_plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!((t - 3.0).abs() < 0.001);

        // Back face
        let up = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        assert!(up.intersects_plane(Vec3::ZERO, Vec3::Y).is_none());
    }
}
