//! Orthographic camera with explicit frustum bounds.

use glam::{Mat4, Vec4};
use viewcam_core::{CameraError, CameraOptions, Result};

use crate::camera::{Camera, CameraBase, FrustumBounds};

/// A parallel-projection camera. Its bounds are set directly rather than
/// derived from a field of view.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    base: CameraBase,
}

impl OrthographicCamera {
    /// Creates the default orthographic camera.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(&CameraOptions::default())
    }

    /// Creates a camera from the orthographic preset in `options`.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let preset = &options.orthographic;
        let mut camera = Self {
            base: CameraBase::new(),
        };
        camera.look_at_from_up(preset.eye, preset.target, preset.world_up);
        camera.set_center_of_interest(preset.center_of_interest);
        camera.set_ortho(
            preset.left,
            preset.right,
            preset.bottom,
            preset.top,
            preset.near_clip,
            preset.far_clip,
        );
        camera
    }

    /// Creates a camera with the given bounds at the default pose (origin,
    /// looking down -Z). The view matrix for that pose is identity, so it
    /// starts out valid.
    #[must_use]
    pub fn with_bounds(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            base: CameraBase::new(),
        };
        camera.set_ortho(left, right, bottom, top, near, far);
        camera.base.view_valid = true;
        camera.base.inverse_view_valid = true;
        camera
    }

    /// Replaces the view volume.
    pub fn set_ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        let base = &mut self.base;
        base.frustum_left = left;
        base.frustum_right = right;
        base.frustum_top = top;
        base.frustum_bottom = bottom;
        base.near_clip = near;
        base.far_clip = far;
        base.invalidate_projection();
    }

    pub fn set_near_clip(&mut self, near_clip: f32) {
        self.base.near_clip = near_clip;
        self.base.invalidate_projection();
    }

    pub fn set_far_clip(&mut self, far_clip: f32) {
        self.base.far_clip = far_clip;
        self.base.invalidate_projection();
    }

    /// Reports bounds that would make the projection singular.
    pub fn validate(&self) -> Result<()> {
        let bounds: FrustumBounds = self.base.frustum_bounds();
        if bounds.width() == 0.0 {
            return Err(CameraError::DegenerateFrustum("horizontal"));
        }
        if bounds.height() == 0.0 {
            return Err(CameraError::DegenerateFrustum("vertical"));
        }
        if bounds.near == bounds.far {
            return Err(CameraError::InvalidClipRange {
                near: bounds.near,
                far: bounds.far,
            });
        }
        if !self.base.view_direction.is_finite() {
            return Err(CameraError::ZeroLengthVector("view direction"));
        }
        Ok(())
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for OrthographicCamera {
    fn base(&self) -> &CameraBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CameraBase {
        &mut self.base
    }

    fn is_perspective(&self) -> bool {
        false
    }

    fn calc_projection(&mut self) {
        let base = &mut self.base;
        let (l, r) = (base.frustum_left, base.frustum_right);
        let (b, t) = (base.frustum_bottom, base.frustum_top);
        let (n, f) = (base.near_clip, base.far_clip);

        base.projection_matrix = Mat4::from_cols(
            Vec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
            Vec4::new(0.0, 0.0, -2.0 / (f - n), 0.0),
            Vec4::new(
                -(r + l) / (r - l),
                -(t + b) / (t - b),
                -(f + n) / (f - n),
                1.0,
            ),
        );

        base.inverse_projection_matrix = Mat4::from_cols(
            Vec4::new((r - l) * 0.5, 0.0, 0.0, 0.0),
            Vec4::new(0.0, (t - b) * 0.5, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -(f - n) * 0.5, 0.0),
            Vec4::new((r + l) * 0.5, (t + b) * 0.5, -(n + f) * 0.5, 1.0),
        );

        base.projection_valid = true;
        log::trace!("recomputed orthographic projection [{l}, {r}] x [{b}, {t}] x [{n}, {f}]");
    }
}
