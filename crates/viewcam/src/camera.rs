//! Camera pose state, lazily cached matrices and the shared query surface.
//!
//! [`CameraBase`] owns everything common to the camera family: the pose
//! (eye point, view direction, orientation, world up, center of interest),
//! the clip planes and frustum bounds, and the cached view/projection
//! matrices with their validity flags.
//!
//! [`Camera`] is the capability trait implemented by every variant. A variant
//! only has to hand out its base and say how to rebuild its projection; all
//! pose mutators and queries are provided on top of that.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use viewcam_core::math::{align_z_axis_with_target, orthogonal_vector};
use viewcam_core::{CameraUniforms, Ray, Sphere};

/// The six scalar bounds of a view volume.
///
/// `left`, `right`, `top` and `bottom` are signed extents measured on the near
/// plane; `near` and `far` are distances along the view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl FrustumBounds {
    /// Horizontal extent on the near plane.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent on the near plane.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// World-space corners of a clip plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipCorners {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

impl ClipCorners {
    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    #[must_use]
    pub fn to_array(&self) -> [Vec3; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Average of the four corners.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.top_left + self.top_right + self.bottom_left + self.bottom_right) * 0.25
    }
}

/// Which clip plane a corner query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClipPlane {
    Near,
    Far,
}

/// Builds a right-handed look-at matrix from an orthonormal basis and the
/// negated eye-point projections.
pub(crate) fn view_from_basis(u: Vec3, v: Vec3, w: Vec3, d: Vec3) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(u.x, v.x, w.x, 0.0),
        Vec4::new(u.y, v.y, w.y, 0.0),
        Vec4::new(u.z, v.z, w.z, 0.0),
        d.extend(1.0),
    )
}

/// Pose, clip state and matrix cache shared by every camera variant.
///
/// Mutators only record new state and clear validity flags. Matrices are
/// rebuilt when a query finds its flag cleared.
#[derive(Debug, Clone)]
pub struct CameraBase {
    pub(crate) eye_point: Vec3,
    pub(crate) view_direction: Vec3,
    pub(crate) orientation: Quat,
    pub(crate) world_up: Vec3,
    pub(crate) center_of_interest: f32,

    pub(crate) near_clip: f32,
    pub(crate) far_clip: f32,
    pub(crate) frustum_left: f32,
    pub(crate) frustum_right: f32,
    pub(crate) frustum_top: f32,
    pub(crate) frustum_bottom: f32,

    // Right, up and backward axes, refreshed with the view matrix.
    pub(crate) u: Vec3,
    pub(crate) v: Vec3,
    pub(crate) w: Vec3,

    pub(crate) view_matrix: Mat4,
    pub(crate) inverse_view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) inverse_projection_matrix: Mat4,

    pub(crate) view_valid: bool,
    pub(crate) inverse_view_valid: bool,
    pub(crate) projection_valid: bool,
}

impl CameraBase {
    /// Creates a base at the origin looking down -Z with +Y up.
    ///
    /// The cached matrices start as identity, which is already the correct view
    /// for this pose, but all flags start cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            eye_point: Vec3::ZERO,
            view_direction: Vec3::NEG_Z,
            orientation: Quat::IDENTITY,
            world_up: Vec3::Y,
            center_of_interest: 1.0,
            near_clip: 0.1,
            far_clip: 1000.0,
            frustum_left: -1.0,
            frustum_right: 1.0,
            frustum_top: 1.0,
            frustum_bottom: -1.0,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            view_matrix: Mat4::IDENTITY,
            inverse_view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            inverse_projection_matrix: Mat4::IDENTITY,
            view_valid: false,
            inverse_view_valid: false,
            projection_valid: false,
        }
    }

    // ===== GETTERS =====

    /// Eye position in world space.
    #[must_use]
    pub fn eye_point(&self) -> Vec3 {
        self.eye_point
    }

    /// Unit view direction.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        self.view_direction
    }

    /// Unit orientation quaternion. Rotating (0, 0, -1) by it gives the view direction.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// World up vector used when the orientation is re-derived.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Distance from the eye to the notional look-at point.
    #[must_use]
    pub fn center_of_interest(&self) -> f32 {
        self.center_of_interest
    }

    /// The notional look-at point.
    #[must_use]
    pub fn center_of_interest_point(&self) -> Vec3 {
        self.eye_point + self.view_direction * self.center_of_interest
    }

    #[must_use]
    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    #[must_use]
    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    /// Whether the cached view matrix matches the current pose.
    #[must_use]
    pub fn is_view_valid(&self) -> bool {
        self.view_valid
    }

    /// Whether the cached projection matches the current lens.
    #[must_use]
    pub fn is_projection_valid(&self) -> bool {
        self.projection_valid
    }

    // ===== POSE MUTATORS =====

    pub fn set_eye_point(&mut self, eye_point: Vec3) {
        self.eye_point = eye_point;
        self.invalidate_view();
    }

    /// Sets the view direction and derives the orientation as the rotation
    /// taking (0, 0, -1) onto it.
    pub fn set_view_direction(&mut self, direction: Vec3) {
        self.view_direction = direction.normalize();
        self.orientation = Quat::from_rotation_arc(Vec3::NEG_Z, self.view_direction);
        self.invalidate_view();
    }

    /// Sets the orientation and derives the view direction from it.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
        self.view_direction = self.orientation * Vec3::NEG_Z;
        self.invalidate_view();
    }

    /// Sets the world up vector and re-rolls the orientation around the
    /// current view direction to respect it.
    pub fn set_world_up(&mut self, world_up: Vec3) {
        self.world_up = world_up.normalize();
        self.orientation = align_z_axis_with_target(-self.view_direction, self.world_up);
        self.invalidate_view();
    }

    /// Turns the camera toward `target` without moving it.
    pub fn look_at(&mut self, target: Vec3) {
        self.view_direction = (target - self.eye_point).normalize();
        self.orientation = align_z_axis_with_target(-self.view_direction, self.world_up);
        self.invalidate_view();
    }

    /// Moves the camera to `eye_point` and turns it toward `target`.
    pub fn look_at_from(&mut self, eye_point: Vec3, target: Vec3) {
        self.eye_point = eye_point;
        self.look_at(target);
    }

    /// Moves the camera to `eye_point`, replaces the world up vector and turns
    /// the camera toward `target`.
    pub fn look_at_from_up(&mut self, eye_point: Vec3, target: Vec3, world_up: Vec3) {
        self.eye_point = eye_point;
        self.world_up = world_up.normalize();
        self.look_at(target);
    }

    /// Sets the center-of-interest distance. Matrices are unaffected.
    pub fn set_center_of_interest(&mut self, distance: f32) {
        self.center_of_interest = distance;
    }

    /// Sets the center of interest to the distance of `point` and looks at it.
    pub fn set_center_of_interest_point(&mut self, point: Vec3) {
        self.center_of_interest = self.eye_point.distance(point);
        self.look_at(point);
    }

    // ===== CACHE =====

    pub(crate) fn invalidate_view(&mut self) {
        self.view_valid = false;
        self.inverse_view_valid = false;
    }

    pub(crate) fn invalidate_projection(&mut self) {
        self.projection_valid = false;
    }

    /// Rebuilds the basis and the view matrix from the pose.
    pub(crate) fn calc_view_matrix(&mut self) {
        self.w = -self.view_direction.normalize();
        self.u = self.orientation * Vec3::X;
        self.v = self.orientation * Vec3::Y;

        let d = Vec3::new(
            -self.eye_point.dot(self.u),
            -self.eye_point.dot(self.v),
            -self.eye_point.dot(self.w),
        );
        self.view_matrix = view_from_basis(self.u, self.v, self.w, d);

        self.view_valid = true;
        self.inverse_view_valid = false;
        log::trace!("recomputed view matrix for eye {:?}", self.eye_point);
    }

    /// General inverse of the current view matrix. Assumes the view is valid.
    pub(crate) fn calc_inverse_view(&mut self) {
        self.inverse_view_matrix = self.view_matrix.inverse();
        self.inverse_view_valid = true;
    }

    pub(crate) fn frustum_bounds(&self) -> FrustumBounds {
        FrustumBounds {
            left: self.frustum_left,
            top: self.frustum_top,
            right: self.frustum_right,
            bottom: self.frustum_bottom,
            near: self.near_clip,
            far: self.far_clip,
        }
    }

    /// Corners of a clip plane seen from `eye`, with the horizontal bounds
    /// offset by `horizontal_shift` (measured on the near plane).
    pub(crate) fn clip_plane_corners(
        &self,
        eye: Vec3,
        horizontal_shift: f32,
        plane: ClipPlane,
    ) -> ClipCorners {
        let view_direction = self.view_direction.normalize();
        let (distance, ratio) = match plane {
            ClipPlane::Near => (self.near_clip, 1.0),
            ClipPlane::Far => (self.far_clip, self.far_clip / self.near_clip),
        };

        let center = eye + distance * view_direction;
        let left = ratio * (self.frustum_left + horizontal_shift) * self.u;
        let right = ratio * (self.frustum_right + horizontal_shift) * self.u;
        let top = ratio * self.frustum_top * self.v;
        let bottom = ratio * self.frustum_bottom * self.v;

        ClipCorners {
            top_left: center + top + left,
            top_right: center + top + right,
            bottom_left: center + bottom + left,
            bottom_right: center + bottom + right,
        }
    }
}

impl Default for CameraBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability shared by perspective, orthographic and stereo cameras.
///
/// Queries take `&mut self` because they may refresh the matrix cache.
/// Degenerate inputs (zero-length directions, `near == far`, empty frustum
/// extents) are not rejected and yield non-finite results.
///
/// `base_mut` and the `calc_*` methods are recompute hooks for camera
/// variants; they are hidden from the docs and not meant to be called by
/// users of a camera.
pub trait Camera {
    /// Shared pose and cache state.
    fn base(&self) -> &CameraBase;

    /// Mutable access to the shared state.
    #[doc(hidden)]
    fn base_mut(&mut self) -> &mut CameraBase;

    /// Rebuilds frustum bounds and projection matrices from the lens
    /// parameters and marks the projection valid.
    #[doc(hidden)]
    fn calc_projection(&mut self);

    /// Whether the projection is a perspective one.
    fn is_perspective(&self) -> bool;

    /// Rebuilds the view matrix (and any derived per-variant views).
    #[doc(hidden)]
    fn calc_view_matrix(&mut self) {
        self.base_mut().calc_view_matrix();
    }

    /// Rebuilds the inverse view matrix, refreshing the view first if needed.
    #[doc(hidden)]
    fn calc_inverse_view(&mut self) {
        if !self.base().view_valid {
            self.calc_view_matrix();
        }
        self.base_mut().calc_inverse_view();
    }

    /// Refreshes the view and projection matrices if they are stale.
    ///
    /// The inverse view is only rebuilt when it is requested.
    #[doc(hidden)]
    fn calc_matrices(&mut self) {
        if !self.base().view_valid {
            self.calc_view_matrix();
        }
        if !self.base().projection_valid {
            self.calc_projection();
        }
    }

    // ===== MATRICES =====

    fn view_matrix(&mut self) -> Mat4 {
        if !self.base().view_valid {
            self.calc_view_matrix();
        }
        self.base().view_matrix
    }

    fn inverse_view_matrix(&mut self) -> Mat4 {
        if !self.base().view_valid || !self.base().inverse_view_valid {
            self.calc_inverse_view();
        }
        self.base().inverse_view_matrix
    }

    fn projection_matrix(&mut self) -> Mat4 {
        if !self.base().projection_valid {
            self.calc_projection();
        }
        self.base().projection_matrix
    }

    fn inverse_projection_matrix(&mut self) -> Mat4 {
        if !self.base().projection_valid {
            self.calc_projection();
        }
        self.base().inverse_projection_matrix
    }

    /// Combined projection * view.
    fn view_projection_matrix(&mut self) -> Mat4 {
        let view = self.view_matrix();
        self.projection_matrix() * view
    }

    // ===== POSE =====

    fn eye_point(&self) -> Vec3 {
        self.base().eye_point
    }

    /// Eye point the current matrices are built from. Same as
    /// [`Camera::eye_point`] except for an active stereo eye.
    fn shifted_eye_point(&self) -> Vec3 {
        self.base().eye_point
    }

    fn view_direction(&self) -> Vec3 {
        self.base().view_direction
    }

    fn orientation(&self) -> Quat {
        self.base().orientation
    }

    fn world_up(&self) -> Vec3 {
        self.base().world_up
    }

    fn center_of_interest(&self) -> f32 {
        self.base().center_of_interest
    }

    fn center_of_interest_point(&self) -> Vec3 {
        self.base().center_of_interest_point()
    }

    fn set_eye_point(&mut self, eye_point: Vec3) {
        self.base_mut().set_eye_point(eye_point);
    }

    fn set_view_direction(&mut self, direction: Vec3) {
        self.base_mut().set_view_direction(direction);
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.base_mut().set_orientation(orientation);
    }

    fn set_world_up(&mut self, world_up: Vec3) {
        self.base_mut().set_world_up(world_up);
    }

    fn look_at(&mut self, target: Vec3) {
        self.base_mut().look_at(target);
    }

    fn look_at_from(&mut self, eye_point: Vec3, target: Vec3) {
        self.base_mut().look_at_from(eye_point, target);
    }

    fn look_at_from_up(&mut self, eye_point: Vec3, target: Vec3, world_up: Vec3) {
        self.base_mut().look_at_from_up(eye_point, target, world_up);
    }

    fn set_center_of_interest(&mut self, distance: f32) {
        self.base_mut().set_center_of_interest(distance);
    }

    fn set_center_of_interest_point(&mut self, point: Vec3) {
        self.base_mut().set_center_of_interest_point(point);
    }

    /// Right (U), up (V) and backward (W) axes of the current pose.
    fn basis(&mut self) -> (Vec3, Vec3, Vec3) {
        if !self.base().view_valid {
            self.calc_view_matrix();
        }
        let base = self.base();
        (base.u, base.v, base.w)
    }

    // ===== FRUSTUM =====

    /// Frustum bounds and clip distances. Perspective bounds are derived from
    /// the lens, so the matrices are refreshed first.
    fn frustum(&mut self) -> FrustumBounds {
        self.calc_matrices();
        self.base().frustum_bounds()
    }

    fn near_clip(&self) -> f32 {
        self.base().near_clip
    }

    fn far_clip(&self) -> f32 {
        self.base().far_clip
    }

    /// World-space corners of the near clip plane.
    fn near_clip_coordinates(&mut self) -> ClipCorners {
        self.calc_matrices();
        let base = self.base();
        base.clip_plane_corners(base.eye_point, 0.0, ClipPlane::Near)
    }

    /// World-space corners of the far clip plane; the near bounds scaled by
    /// `far / near`.
    fn far_clip_coordinates(&mut self) -> ClipCorners {
        self.calc_matrices();
        let base = self.base();
        base.clip_plane_corners(base.eye_point, 0.0, ClipPlane::Far)
    }

    // ===== QUERIES =====

    /// Maps image-plane coordinates in [0, 1] x [0, 1] to a world-space ray
    /// leaving the eye point.
    fn generate_ray(&mut self, u: f32, v: f32, image_plane_aspect_ratio: f32) -> Ray {
        self.calc_matrices();
        let base = self.base();

        let s = (u - 0.5) * image_plane_aspect_ratio;
        let t = v - 0.5;
        let view_distance = image_plane_aspect_ratio
            / (base.frustum_right - base.frustum_left).abs()
            * base.near_clip;

        Ray::new(
            base.eye_point,
            (base.u * s + base.v * t - base.w * view_distance).normalize(),
        )
    }

    /// Columns 0 and 1 of the view matrix, used for screen-aligned billboards.
    fn billboard_vectors(&mut self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        (view.x_axis.truncate(), view.y_axis.truncate())
    }

    /// Projects a world point to pixel coordinates with a top-left origin.
    fn world_to_screen(&mut self, world: Vec3, screen_width: f32, screen_height: f32) -> Vec2 {
        let eye = (self.view_matrix() * world.extend(1.0)).truncate();
        let clip = self.projection_matrix() * eye.extend(1.0);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        Vec2::new(
            (ndc_x + 1.0) / 2.0 * screen_width,
            (1.0 - (ndc_y + 1.0) / 2.0) * screen_height,
        )
    }

    /// Eye-space z of a world point. Negative in front of the camera.
    fn world_to_eye_depth(&mut self, world: Vec3) -> f32 {
        let m = self.view_matrix();
        m.x_axis.z * world.x + m.y_axis.z * world.y + m.z_axis.z * world.z + m.w_axis.z
    }

    /// Projects a world point to normalized device coordinates.
    fn world_to_ndc(&mut self, world: Vec3) -> Vec3 {
        let eye = self.view_matrix() * world.extend(1.0);
        let clip = self.projection_matrix() * eye;
        clip.truncate() / clip.w
    }

    /// Approximate on-screen radius of `sphere` in pixels.
    ///
    /// Projects the center and one point on the sphere offset perpendicular to
    /// the view direction. This breaks down under strong perspective
    /// distortion and for spheres far from the view axis.
    fn screen_radius(&mut self, sphere: &Sphere, screen_width: f32, screen_height: f32) -> f32 {
        let screen_center = self.world_to_screen(sphere.center(), screen_width, screen_height);
        let orthogonal = orthogonal_vector(self.base().view_direction).normalize();
        let screen_perimeter = self.world_to_screen(
            sphere.center() + sphere.radius() * orthogonal,
            screen_width,
            screen_height,
        );
        screen_perimeter.distance(screen_center)
    }

    /// Current matrices packed for a uniform buffer.
    fn uniforms(&mut self) -> CameraUniforms {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let inverse_view = self.inverse_view_matrix();
        let inverse_projection = self.inverse_projection_matrix();
        CameraUniforms::new(
            view,
            projection,
            inverse_view,
            inverse_projection,
            self.shifted_eye_point(),
        )
    }
}
