//! GPU-compatible camera constants.

use glam::{Mat4, Vec3};

/// Camera transforms laid out for a uniform/constant buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// World to eye space.
    pub view: [[f32; 4]; 4],
    /// Eye to clip space.
    pub projection: [[f32; 4]; 4],
    /// Eye to world space.
    pub inverse_view: [[f32; 4]; 4],
    /// Clip to eye space.
    pub inverse_projection: [[f32; 4]; 4],
    /// Eye position in world space (shifted per eye for stereo).
    pub eye_position: [f32; 3],
    /// Padding for alignment.
    pub _padding: f32,
}

impl CameraUniforms {
    /// Packs the given matrices and eye position.
    #[must_use]
    pub fn new(
        view: Mat4,
        projection: Mat4,
        inverse_view: Mat4,
        inverse_projection: Mat4,
        eye_position: Vec3,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            inverse_view: inverse_view.to_cols_array_2d(),
            inverse_projection: inverse_projection.to_cols_array_2d(),
            eye_position: eye_position.to_array(),
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::new(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Vec3::ZERO,
        )
    }
}
