//! Stereo camera built on the perspective camera.
//!
//! Both eyes share the mono orientation and sit half the eye separation to
//! either side of the eye point along the camera's right axis. Their frusta
//! are shifted horizontally (parallel axes, no toe-in) so the two images
//! coincide at the convergence distance.

use glam::{Affine3A, Mat4, Vec2, Vec3};
use viewcam_core::{CameraError, CameraOptions, Result, Sphere, StereoPreset};

use crate::camera::{Camera, CameraBase, ClipCorners, ClipPlane};
use crate::perspective::PerspectiveCamera;

/// Which eye a stereo camera renders when stereo is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StereoEye {
    #[default]
    Left,
    Right,
}

impl StereoEye {
    /// -1 for the left eye, +1 for the right eye, along the right axis.
    fn offset_sign(self) -> f32 {
        match self {
            StereoEye::Left => -1.0,
            StereoEye::Right => 1.0,
        }
    }
}

/// A perspective camera with left and right eye matrix sets.
///
/// With stereo disabled every accessor returns the mono matrices.
#[derive(Debug, Clone)]
pub struct StereoCamera {
    perspective: PerspectiveCamera,
    stereo_enabled: bool,
    active_eye: StereoEye,
    eye_separation: f32,
    convergence: f32,
    auto_separation_divisor: f32,

    view_left: Mat4,
    view_right: Mat4,
    inverse_view_left: Mat4,
    inverse_view_right: Mat4,
    projection_left: Mat4,
    projection_right: Mat4,
    inverse_projection_left: Mat4,
    inverse_projection_right: Mat4,
}

impl StereoCamera {
    /// Creates a stereo camera with the default presets. Stereo starts disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(&CameraOptions::default())
    }

    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self::from_perspective(PerspectiveCamera::from_options(options), &options.stereo)
    }

    /// Stereo camera over a pixel-plane perspective camera.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, fov_degrees: f32) -> Self {
        Self::from_perspective(
            PerspectiveCamera::from_pixels(width, height, fov_degrees),
            &StereoPreset::default(),
        )
    }

    #[must_use]
    pub fn from_pixels_with_clip(
        width: u32,
        height: u32,
        fov_degrees: f32,
        near_clip: f32,
        far_clip: f32,
    ) -> Self {
        Self::from_perspective(
            PerspectiveCamera::from_pixels_with_clip(width, height, fov_degrees, near_clip, far_clip),
            &StereoPreset::default(),
        )
    }

    /// Wraps an existing perspective camera.
    #[must_use]
    pub fn from_perspective(mut perspective: PerspectiveCamera, preset: &StereoPreset) -> Self {
        // Per-eye matrices are filled on the next recompute.
        perspective.base_mut().invalidate_view();
        perspective.base_mut().invalidate_projection();
        Self {
            perspective,
            stereo_enabled: false,
            active_eye: StereoEye::Left,
            eye_separation: preset.eye_separation,
            convergence: preset.convergence,
            auto_separation_divisor: preset.auto_separation_divisor,
            view_left: Mat4::IDENTITY,
            view_right: Mat4::IDENTITY,
            inverse_view_left: Mat4::IDENTITY,
            inverse_view_right: Mat4::IDENTITY,
            projection_left: Mat4::IDENTITY,
            projection_right: Mat4::IDENTITY,
            inverse_projection_left: Mat4::IDENTITY,
            inverse_projection_right: Mat4::IDENTITY,
        }
    }

    /// The underlying mono camera.
    #[must_use]
    pub fn perspective(&self) -> &PerspectiveCamera {
        &self.perspective
    }

    // ===== STEREO STATE =====

    #[must_use]
    pub fn is_stereo_enabled(&self) -> bool {
        self.stereo_enabled
    }

    #[must_use]
    pub fn is_stereo_left(&self) -> bool {
        self.stereo_enabled && self.active_eye == StereoEye::Left
    }

    #[must_use]
    pub fn is_stereo_right(&self) -> bool {
        self.stereo_enabled && self.active_eye == StereoEye::Right
    }

    #[must_use]
    pub fn active_eye(&self) -> StereoEye {
        self.active_eye
    }

    pub fn enable_stereo_left(&mut self) {
        self.stereo_enabled = true;
        self.active_eye = StereoEye::Left;
    }

    pub fn enable_stereo_right(&mut self) {
        self.stereo_enabled = true;
        self.active_eye = StereoEye::Right;
    }

    pub fn disable_stereo(&mut self) {
        self.stereo_enabled = false;
    }

    /// Selects the eye used while stereo is enabled.
    pub fn set_active_eye(&mut self, eye: StereoEye) {
        self.active_eye = eye;
    }

    #[must_use]
    pub fn eye_separation(&self) -> f32 {
        self.eye_separation
    }

    pub fn set_eye_separation(&mut self, distance: f32) {
        self.eye_separation = distance;
        self.perspective.base_mut().invalidate_view();
        self.perspective.base_mut().invalidate_projection();
    }

    /// Distance of the zero-parallax plane.
    #[must_use]
    pub fn convergence(&self) -> f32 {
        self.convergence
    }

    /// Sets the convergence distance. With `adjust_eye_separation` the eye
    /// separation follows it (a thirtieth of the distance by default).
    pub fn set_convergence(&mut self, distance: f32, adjust_eye_separation: bool) {
        self.convergence = distance;
        self.perspective.base_mut().invalidate_projection();
        if adjust_eye_separation {
            self.set_eye_separation(distance / self.auto_separation_divisor);
        }
    }

    /// Horizontal frustum offset of the active eye on the near plane.
    fn frustum_shift(&self) -> f32 {
        if !self.stereo_enabled {
            return 0.0;
        }
        let shift = 0.5 * self.eye_separation * (self.perspective.near_clip() / self.convergence);
        -self.active_eye.offset_sign() * shift
    }

    fn eye_point_for(&self, eye: StereoEye) -> Vec3 {
        let base = self.perspective.base();
        base.eye_point + (base.orientation * Vec3::X) * (eye.offset_sign() * 0.5 * self.eye_separation)
    }

    // ===== LENS (delegated) =====

    pub fn set_perspective(
        &mut self,
        vertical_fov_degrees: f32,
        aspect_ratio: f32,
        near_clip: f32,
        far_clip: f32,
    ) {
        self.perspective
            .set_perspective(vertical_fov_degrees, aspect_ratio, near_clip, far_clip);
    }

    #[must_use]
    pub fn fov(&self) -> f32 {
        self.perspective.fov()
    }

    pub fn set_fov(&mut self, vertical_fov_degrees: f32) {
        self.perspective.set_fov(vertical_fov_degrees);
    }

    #[must_use]
    pub fn fov_horizontal(&self) -> f32 {
        self.perspective.fov_horizontal()
    }

    pub fn set_fov_horizontal(&mut self, horizontal_fov_degrees: f32) {
        self.perspective.set_fov_horizontal(horizontal_fov_degrees);
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.perspective.aspect_ratio()
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.perspective.set_aspect_ratio(aspect_ratio);
    }

    pub fn set_near_clip(&mut self, near_clip: f32) {
        self.perspective.set_near_clip(near_clip);
    }

    pub fn set_far_clip(&mut self, far_clip: f32) {
        self.perspective.set_far_clip(far_clip);
    }

    #[must_use]
    pub fn lens_shift(&self) -> Vec2 {
        self.perspective.lens_shift()
    }

    pub fn set_lens_shift(&mut self, horizontal: f32, vertical: f32) {
        self.perspective.set_lens_shift(horizontal, vertical);
    }

    pub fn set_lens_shift_horizontal(&mut self, horizontal: f32) {
        self.perspective.set_lens_shift_horizontal(horizontal);
    }

    pub fn set_lens_shift_vertical(&mut self, vertical: f32) {
        self.perspective.set_lens_shift_vertical(vertical);
    }

    pub fn validate(&self) -> Result<()> {
        self.perspective.validate()?;
        if self.convergence <= 0.0 {
            return Err(CameraError::InvalidConvergence(self.convergence));
        }
        Ok(())
    }

    /// Frames `sphere` with the mono frustum, keeping the stereo settings.
    #[must_use]
    pub fn frame_sphere(&self, sphere: &Sphere, max_iterations: u32) -> Self {
        let mut result = self.clone();
        result.perspective = self.perspective.frame_sphere(sphere, max_iterations);
        // Framing refreshed only the mono cache.
        result.perspective.base_mut().invalidate_view();
        result.perspective.base_mut().invalidate_projection();
        result
    }
}

impl Default for StereoCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for StereoCamera {
    fn base(&self) -> &CameraBase {
        self.perspective.base()
    }

    fn base_mut(&mut self) -> &mut CameraBase {
        self.perspective.base_mut()
    }

    fn is_perspective(&self) -> bool {
        true
    }

    fn calc_view_matrix(&mut self) {
        self.perspective.base_mut().calc_view_matrix();

        let base = self.perspective.base();
        let (u, v, w) = (base.u, base.v, base.w);
        let mono = base.view_matrix;
        let translation = |eye: Vec3| Vec3::new(-eye.dot(u), -eye.dot(v), -eye.dot(w)).extend(1.0);

        self.view_left = mono;
        self.view_left.w_axis = translation(self.eye_point_for(StereoEye::Left));
        self.view_right = mono;
        self.view_right.w_axis = translation(self.eye_point_for(StereoEye::Right));
        log::trace!("recomputed stereo view matrices (separation {})", self.eye_separation);
    }

    fn calc_inverse_view(&mut self) {
        if !self.perspective.base().view_valid {
            self.calc_view_matrix();
        }
        let affine_inverse = |m: Mat4| Mat4::from(Affine3A::from_mat4(m).inverse());

        let base = self.perspective.base_mut();
        base.inverse_view_matrix = affine_inverse(base.view_matrix);
        base.inverse_view_valid = true;
        self.inverse_view_left = affine_inverse(self.view_left);
        self.inverse_view_right = affine_inverse(self.view_right);
    }

    fn calc_projection(&mut self) {
        self.perspective.calc_projection();

        let base = self.perspective.base();
        let (left, right, near) = (base.frustum_left, base.frustum_right, base.near_clip);
        let offset = self.eye_separation * (near / self.convergence);

        self.projection_left = base.projection_matrix;
        self.inverse_projection_left = base.inverse_projection_matrix;
        self.projection_right = base.projection_matrix;
        self.inverse_projection_right = base.inverse_projection_matrix;

        self.projection_left.z_axis.x = (right + left + offset) / (right - left);
        self.inverse_projection_left.w_axis.x = (right + left + offset) / (2.0 * near);

        self.projection_right.z_axis.x = (right + left - offset) / (right - left);
        self.inverse_projection_right.w_axis.x = (right + left - offset) / (2.0 * near);
        log::trace!("recomputed stereo projections (convergence {})", self.convergence);
    }

    fn view_matrix(&mut self) -> Mat4 {
        if !self.perspective.base().view_valid {
            self.calc_view_matrix();
        }
        match (self.stereo_enabled, self.active_eye) {
            (false, _) => self.perspective.base().view_matrix,
            (true, StereoEye::Left) => self.view_left,
            (true, StereoEye::Right) => self.view_right,
        }
    }

    fn inverse_view_matrix(&mut self) -> Mat4 {
        let base = self.perspective.base();
        if !base.view_valid || !base.inverse_view_valid {
            self.calc_inverse_view();
        }
        match (self.stereo_enabled, self.active_eye) {
            (false, _) => self.perspective.base().inverse_view_matrix,
            (true, StereoEye::Left) => self.inverse_view_left,
            (true, StereoEye::Right) => self.inverse_view_right,
        }
    }

    fn projection_matrix(&mut self) -> Mat4 {
        if !self.perspective.base().projection_valid {
            self.calc_projection();
        }
        match (self.stereo_enabled, self.active_eye) {
            (false, _) => self.perspective.base().projection_matrix,
            (true, StereoEye::Left) => self.projection_left,
            (true, StereoEye::Right) => self.projection_right,
        }
    }

    fn inverse_projection_matrix(&mut self) -> Mat4 {
        if !self.perspective.base().projection_valid {
            self.calc_projection();
        }
        match (self.stereo_enabled, self.active_eye) {
            (false, _) => self.perspective.base().inverse_projection_matrix,
            (true, StereoEye::Left) => self.inverse_projection_left,
            (true, StereoEye::Right) => self.inverse_projection_right,
        }
    }

    /// The eye point moved half the separation along the right axis toward
    /// the active eye, or the mono eye point with stereo disabled.
    fn shifted_eye_point(&self) -> Vec3 {
        if self.stereo_enabled {
            self.eye_point_for(self.active_eye)
        } else {
            self.perspective.base().eye_point
        }
    }

    fn near_clip_coordinates(&mut self) -> ClipCorners {
        self.calc_matrices();
        self.perspective.base().clip_plane_corners(
            self.shifted_eye_point(),
            self.frustum_shift(),
            ClipPlane::Near,
        )
    }

    fn far_clip_coordinates(&mut self) -> ClipCorners {
        self.calc_matrices();
        self.perspective.base().clip_plane_corners(
            self.shifted_eye_point(),
            self.frustum_shift(),
            ClipPlane::Far,
        )
    }
}
