//! Bounding sphere.

use glam::Vec3;

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Creates a new sphere.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Sets the center of the sphere.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Returns the radius of the sphere.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius of the sphere.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Computes a sphere enclosing `points`.
    ///
    /// The center is the midpoint of the bounding box; the radius reaches the
    /// farthest point. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);
        Some(Self { center, radius })
    }

    /// Returns whether `point` lies inside or on the sphere.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}
