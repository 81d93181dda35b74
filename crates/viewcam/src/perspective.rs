//! Perspective camera: field of view, aspect ratio, lens shift and sphere framing.

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3, Vec4};
use viewcam_core::error::check_clip_range;
use viewcam_core::math::lerp;
use viewcam_core::{CameraError, CameraOptions, Result, Sphere};

use crate::camera::{Camera, CameraBase};

/// Eye distance bounds searched by [`PerspectiveCamera::frame_sphere`].
const FRAME_MIN_DISTANCE: f32 = 0.01;
const FRAME_MAX_DISTANCE: f32 = 100_000.0;

/// Viewport used to measure the framed radius. A radius of 1 on a 2x2
/// viewport means the sphere spans the full height.
const FRAME_VIEWPORT: f32 = 2.0;

/// Off-center perspective projection (OpenGL clip convention, z in [-1, 1]).
pub(crate) fn frustum_matrix(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
        Vec4::new(
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / (far - near), 0.0),
    )
}

/// Closed-form inverse of [`frustum_matrix`].
pub(crate) fn inverse_frustum_matrix(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    Mat4::from_cols(
        Vec4::new((right - left) / (2.0 * near), 0.0, 0.0, 0.0),
        Vec4::new(0.0, (top - bottom) / (2.0 * near), 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, -(far - near) / (2.0 * far * near)),
        Vec4::new(
            (right + left) / (2.0 * near),
            (top + bottom) / (2.0 * near),
            -1.0,
            (far + near) / (2.0 * far * near),
        ),
    )
}

/// A pinhole camera with an optional lens shift.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    base: CameraBase,
    /// Vertical field of view in degrees.
    fov: f32,
    aspect_ratio: f32,
    /// Normalized (-1..1) horizontal and vertical frustum offsets.
    lens_shift: Vec2,
}

impl PerspectiveCamera {
    /// Creates the default "studio view" camera.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(&CameraOptions::default())
    }

    /// Creates a camera from the perspective preset in `options`.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let preset = &options.perspective;
        let mut camera = Self::bare();
        camera.look_at_from_up(preset.eye, preset.target, preset.world_up);
        camera.set_center_of_interest(preset.center_of_interest);
        camera.set_perspective(
            preset.fov_degrees,
            preset.aspect_ratio,
            preset.near_clip,
            preset.far_clip,
        );
        camera
    }

    /// Creates a camera looking straight at a `width` x `height` pixel plane
    /// at z = 0, positioned so the plane exactly fills the vertical field of
    /// view. Near and far planes are derived from the plane distance.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, fov_degrees: f32) -> Self {
        Self::from_pixels_with_options(width, height, fov_degrees, &CameraOptions::default())
    }

    /// Like [`PerspectiveCamera::from_pixels`], with the near/far ratio taken
    /// from `options`.
    #[must_use]
    pub fn from_pixels_with_options(
        width: u32,
        height: u32,
        fov_degrees: f32,
        options: &CameraOptions,
    ) -> Self {
        let distance = pixel_plane_distance(height, fov_degrees);
        let ratio = options.pixel_clip_ratio;
        Self::from_pixels_with_clip(width, height, fov_degrees, distance / ratio, distance * ratio)
    }

    /// Creates a pixel-plane camera with explicit near and far planes.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_pixels_with_clip(
        width: u32,
        height: u32,
        fov_degrees: f32,
        near_clip: f32,
        far_clip: f32,
    ) -> Self {
        let eye_x = width as f32 / 2.0;
        let eye_y = height as f32 / 2.0;
        let distance = pixel_plane_distance(height, fov_degrees);
        let aspect_ratio = width as f32 / height as f32;

        let mut camera = Self::bare();
        camera.set_perspective(fov_degrees, aspect_ratio, near_clip, far_clip);
        camera.look_at_from(
            Vec3::new(eye_x, eye_y, distance),
            Vec3::new(eye_x, eye_y, 0.0),
        );
        camera
    }

    fn bare() -> Self {
        Self {
            base: CameraBase::new(),
            fov: 35.0,
            aspect_ratio: 1.0,
            lens_shift: Vec2::ZERO,
        }
    }

    // ===== LENS =====

    /// Sets field of view (degrees), aspect ratio and clip planes at once.
    pub fn set_perspective(
        &mut self,
        vertical_fov_degrees: f32,
        aspect_ratio: f32,
        near_clip: f32,
        far_clip: f32,
    ) {
        self.fov = vertical_fov_degrees;
        self.aspect_ratio = aspect_ratio;
        self.base.near_clip = near_clip;
        self.base.far_clip = far_clip;
        self.base.invalidate_projection();
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, vertical_fov_degrees: f32) {
        self.fov = vertical_fov_degrees;
        self.base.invalidate_projection();
    }

    /// Horizontal field of view in degrees, derived from the vertical one and
    /// the aspect ratio.
    #[must_use]
    pub fn fov_horizontal(&self) -> f32 {
        (2.0 * ((self.fov.to_radians() * 0.5).tan() * self.aspect_ratio).atan()).to_degrees()
    }

    /// Sets the vertical field of view so the horizontal one becomes
    /// `horizontal_fov_degrees` at the current aspect ratio.
    pub fn set_fov_horizontal(&mut self, horizontal_fov_degrees: f32) {
        self.fov = (2.0
            * ((horizontal_fov_degrees.to_radians() * 0.5).tan() / self.aspect_ratio).atan())
        .to_degrees();
        self.base.invalidate_projection();
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.base.invalidate_projection();
    }

    pub fn set_near_clip(&mut self, near_clip: f32) {
        self.base.near_clip = near_clip;
        self.base.invalidate_projection();
    }

    pub fn set_far_clip(&mut self, far_clip: f32) {
        self.base.far_clip = far_clip;
        self.base.invalidate_projection();
    }

    /// Normalized lens shift (horizontal, vertical).
    #[must_use]
    pub fn lens_shift(&self) -> Vec2 {
        self.lens_shift
    }

    /// Shifts the frustum off-center. Values are in -1..1; a shift of 1 moves
    /// the frustum by half its size.
    pub fn set_lens_shift(&mut self, horizontal: f32, vertical: f32) {
        self.lens_shift = Vec2::new(horizontal, vertical);
        self.base.invalidate_projection();
    }

    pub fn set_lens_shift_horizontal(&mut self, horizontal: f32) {
        self.set_lens_shift(horizontal, self.lens_shift.y);
    }

    pub fn set_lens_shift_vertical(&mut self, vertical: f32) {
        self.set_lens_shift(self.lens_shift.x, vertical);
    }

    /// Checks the lens and pose for values that would produce non-finite
    /// matrices. The camera itself never rejects such values.
    pub fn validate(&self) -> Result<()> {
        if !self.base.view_direction.is_finite() {
            return Err(CameraError::ZeroLengthVector("view direction"));
        }
        if !self.base.world_up.is_finite() {
            return Err(CameraError::ZeroLengthVector("world up"));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.fov));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        check_clip_range(self.base.near_clip, self.base.far_clip)
    }

    // ===== FRAMING =====

    /// Returns a copy of this camera moved along its view direction so that
    /// `sphere` fills the viewport.
    ///
    /// Runs exactly `max_iterations` bisection steps over the eye-to-center
    /// distance in [0.01, 100000], starting from the center of interest and
    /// measuring the projected radius on a 2x2 viewport. The copy's center of
    /// interest is set to its final distance from the sphere center.
    ///
    /// Before the search the copy's eye is moved onto the line through the
    /// sphere center along the view direction, at the current center of
    /// interest. With `max_iterations == 0` the result is therefore that
    /// re-centered camera, not an unmoved one.
    #[must_use]
    pub fn frame_sphere(&self, sphere: &Sphere, max_iterations: u32) -> Self {
        let mut result = self.clone();
        let direction = result.base.view_direction;
        let center = sphere.center();
        result.set_eye_point(center - direction * self.base.center_of_interest);

        let mut min_distance = FRAME_MIN_DISTANCE;
        let mut max_distance = FRAME_MAX_DISTANCE;
        let mut cur_distance = self.base.center_of_interest;
        for _ in 0..max_iterations {
            let cur_radius = result.screen_radius(sphere, FRAME_VIEWPORT, FRAME_VIEWPORT);
            if cur_radius < 1.0 {
                // too small on screen: move closer
                max_distance = cur_distance;
                cur_distance = (cur_distance + min_distance) * 0.5;
            } else {
                min_distance = cur_distance;
                cur_distance = (cur_distance + max_distance) * 0.5;
            }
            result.set_eye_point(center - direction * cur_distance);
        }

        let final_distance = result.base.eye_point.distance(center);
        result.set_center_of_interest(final_distance);
        log::debug!(
            "framed sphere of radius {} at distance {final_distance} after {max_iterations} iterations",
            sphere.radius()
        );
        result
    }
}

/// Distance at which a plane `height` pixels tall fills `fov_degrees`.
#[allow(clippy::cast_precision_loss)]
fn pixel_plane_distance(height: u32, fov_degrees: f32) -> f32 {
    let half_fov = PI * fov_degrees / 360.0;
    (height as f32 / 2.0) / half_fov.tan()
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for PerspectiveCamera {
    fn base(&self) -> &CameraBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CameraBase {
        &mut self.base
    }

    fn is_perspective(&self) -> bool {
        true
    }

    fn calc_projection(&mut self) {
        let base = &mut self.base;
        base.frustum_top = base.near_clip * (PI / 180.0 * self.fov * 0.5).tan();
        base.frustum_bottom = -base.frustum_top;
        base.frustum_right = base.frustum_top * self.aspect_ratio;
        base.frustum_left = -base.frustum_right;

        if self.lens_shift.y != 0.0 {
            let t = 0.5 + 0.5 * self.lens_shift.y;
            base.frustum_top = lerp(0.0, 2.0 * base.frustum_top, t);
            base.frustum_bottom = lerp(2.0 * base.frustum_bottom, 0.0, t);
        }

        if self.lens_shift.x != 0.0 {
            let t = 0.5 - 0.5 * self.lens_shift.x;
            base.frustum_right = lerp(2.0 * base.frustum_right, 0.0, t);
            base.frustum_left = lerp(0.0, 2.0 * base.frustum_left, t);
        }

        let (l, r, b, t) = (
            base.frustum_left,
            base.frustum_right,
            base.frustum_bottom,
            base.frustum_top,
        );
        let (n, f) = (base.near_clip, base.far_clip);
        base.projection_matrix = frustum_matrix(l, r, b, t, n, f);
        base.inverse_projection_matrix = inverse_frustum_matrix(l, r, b, t, n, f);
        base.projection_valid = true;
        log::trace!(
            "recomputed perspective projection (fov {}, aspect {})",
            self.fov,
            self.aspect_ratio
        );
    }
}
