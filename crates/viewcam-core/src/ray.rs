//! Rays generated from camera image-plane coordinates.

use glam::Vec3;

/// A half-line starting at `origin` and heading along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Ray direction (normalized by the cameras that produce it).
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parameter `t` along the ray.
    #[must_use]
    pub fn position_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersects the ray with the plane through `origin` with normal `normal`.
    ///
    /// Returns the ray parameter of the hit, or `None` when the ray is parallel
    /// to the plane or the hit lies behind the origin.
    #[must_use]
    pub fn intersect_plane(&self, origin: Vec3, normal: Vec3) -> Option<f32> {
        let denom = self.direction.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (origin - self.origin).dot(normal) / denom;
        (t >= 0.0).then_some(t)
    }
}
