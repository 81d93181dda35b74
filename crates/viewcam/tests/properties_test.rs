//! Property tests for pose and matrix invariants.

use proptest::prelude::*;
use viewcam::*;

fn vec3_strategy(range: f32) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Directions comfortably away from zero length and from the reverse of the
/// canonical forward axis, where the shortest-arc rotation is ill conditioned.
fn direction_strategy() -> impl Strategy<Value = Vec3> {
    vec3_strategy(1.0).prop_filter("non-degenerate direction", |v| {
        v.length() > 0.1 && v.normalize().z < 0.99
    })
}

/// Eye and target at least a unit apart, with the view direction kept away
/// from the up axis so the look-at basis is well conditioned.
fn look_at_strategy() -> impl Strategy<Value = (Vec3, Vec3)> {
    (vec3_strategy(50.0), vec3_strategy(50.0)).prop_filter("well-conditioned look-at", |(eye, target)| {
        let dir = *target - *eye;
        dir.length() > 1.0 && dir.normalize().dot(Vec3::Y).abs() < 0.95
    })
}

/// Whether `up` is far enough from the line of `direction` to define a roll.
fn up_is_usable(direction: Vec3, up: Vec3) -> bool {
    direction.length() > 1.0e-3 && direction.normalize().dot(up.normalize()).abs() < 0.95
}

fn assert_orthonormal_basis(camera: &mut dyn Camera) -> std::result::Result<(), TestCaseError> {
    let (u, v, w) = camera.basis();
    prop_assert!((u.length() - 1.0).abs() < 1e-5);
    prop_assert!((v.length() - 1.0).abs() < 1e-5);
    prop_assert!((w.length() - 1.0).abs() < 1e-5);
    prop_assert!(u.dot(v).abs() < 1e-5);
    prop_assert!(u.dot(w).abs() < 1e-5);
    prop_assert!(v.dot(w).abs() < 1e-5);
    // right-handed
    prop_assert!((u.cross(v) - w).length() < 1e-5);
    prop_assert!((w + camera.view_direction().normalize()).length() < 1e-5);
    Ok(())
}

proptest! {
    #[test]
    fn basis_is_orthonormal_after_look_at((eye, target) in look_at_strategy()) {
        let mut camera = PerspectiveCamera::new();
        camera.look_at_from_up(eye, target, Vec3::Y);
        assert_orthonormal_basis(&mut camera)?;
    }

    #[test]
    fn basis_is_orthonormal_after_pose_sequence(
        direction in direction_strategy(),
        eye in vec3_strategy(20.0),
        angle in -3.0f32..3.0,
    ) {
        let mut camera = PerspectiveCamera::new();
        camera.set_view_direction(direction);
        assert_orthonormal_basis(&mut camera)?;

        camera.set_eye_point(eye);
        camera.set_orientation(camera.orientation() * Quat::from_rotation_z(angle));
        assert_orthonormal_basis(&mut camera)?;
    }

    #[test]
    fn basis_is_orthonormal_after_look_at_and_world_up_changes(
        (eye, target) in look_at_strategy(),
        up in direction_strategy(),
        second_target in vec3_strategy(50.0),
        interest_point in vec3_strategy(50.0),
    ) {
        let mut camera = PerspectiveCamera::new();
        camera.look_at_from(eye, target);
        assert_orthonormal_basis(&mut camera)?;

        let direction = camera.view_direction();
        prop_assume!(up_is_usable(direction, up));
        camera.set_world_up(up);
        assert_orthonormal_basis(&mut camera)?;
        // Re-rolled in place: same direction, up axis in the plane of W and world up.
        prop_assert!((camera.view_direction() - direction).length() < 1e-6);
        let (_, v, w) = camera.basis();
        let up = up.normalize();
        prop_assert!(v.dot(w.cross(up)).abs() < 1e-4);
        prop_assert!(v.dot(up) > 0.0);

        prop_assume!((second_target - eye).length() > 1.0);
        prop_assume!(up_is_usable(second_target - eye, up));
        camera.look_at(second_target);
        assert_orthonormal_basis(&mut camera)?;
        prop_assert!((camera.view_direction() - (second_target - eye).normalize()).length() < 1e-5);

        prop_assume!((interest_point - eye).length() > 1.0);
        prop_assume!(up_is_usable(interest_point - eye, up));
        camera.set_center_of_interest_point(interest_point);
        assert_orthonormal_basis(&mut camera)?;
        prop_assert!((camera.center_of_interest() - eye.distance(interest_point)).abs() < 1e-3);
        prop_assert!((camera.center_of_interest_point() - interest_point).length() < 1e-3);
    }

    #[test]
    fn view_direction_round_trips(direction in direction_strategy()) {
        let mut camera = PerspectiveCamera::new();
        camera.set_view_direction(direction);
        let implied = camera.orientation() * Vec3::NEG_Z;
        prop_assert!((implied - direction.normalize()).length() < 1e-4);
        prop_assert!((camera.view_direction() - direction.normalize()).length() < 1e-6);
    }

    #[test]
    fn perspective_projection_inverts(
        fov in 10.0f32..120.0,
        aspect in 0.25f32..4.0,
        near in 0.05f32..5.0,
        depth in 10.0f32..500.0,
        shift_x in -1.0f32..1.0,
        shift_y in -1.0f32..1.0,
    ) {
        let mut camera = PerspectiveCamera::new();
        camera.set_perspective(fov, aspect, near, near + depth);
        camera.set_lens_shift(shift_x, shift_y);
        let product = camera.projection_matrix() * camera.inverse_projection_matrix();
        prop_assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4), "{product:?}");
    }

    #[test]
    fn orthographic_projection_inverts(
        left in -50.0f32..-0.5,
        right in 0.5f32..50.0,
        bottom in -50.0f32..-0.5,
        top in 0.5f32..50.0,
        near in -10.0f32..10.0,
        depth in 1.0f32..500.0,
    ) {
        let mut camera = OrthographicCamera::with_bounds(left, right, bottom, top, near, near + depth);
        let product = camera.projection_matrix() * camera.inverse_projection_matrix();
        prop_assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4), "{product:?}");
    }

    #[test]
    fn view_matrix_inverts((eye, target) in look_at_strategy()) {
        let mut perspective = PerspectiveCamera::new();
        perspective.look_at_from_up(eye, target, Vec3::Y);
        let product = perspective.view_matrix() * perspective.inverse_view_matrix();
        prop_assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));

        let mut ortho = OrthographicCamera::new();
        ortho.look_at_from_up(eye, target, Vec3::Y);
        let product = ortho.view_matrix() * ortho.inverse_view_matrix();
        prop_assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn look_at_target_projects_to_center((eye, target) in look_at_strategy()) {
        let mut camera = PerspectiveCamera::new();
        camera.look_at_from_up(eye, target, Vec3::Y);
        let ndc = camera.world_to_ndc(target);
        prop_assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3, "{ndc:?}");
    }

    #[test]
    fn stereo_shifts_are_symmetric(
        separation in 0.01f32..1.0,
        convergence in 0.5f32..50.0,
        (eye, target) in look_at_strategy(),
    ) {
        let mut camera = StereoCamera::new();
        camera.look_at_from_up(eye, target, Vec3::Y);
        camera.set_eye_separation(separation);
        camera.set_convergence(convergence, false);

        let mono_projection = camera.projection_matrix();
        let mono_view = camera.view_matrix();

        camera.enable_stereo_left();
        let left_projection = camera.projection_matrix();
        let left_view = camera.view_matrix();
        camera.enable_stereo_right();
        let right_projection = camera.projection_matrix();
        let right_view = camera.view_matrix();

        let left_shift = left_projection.z_axis.x - mono_projection.z_axis.x;
        let right_shift = right_projection.z_axis.x - mono_projection.z_axis.x;
        prop_assert!((left_shift + right_shift).abs() < 1e-5);

        let left_offset = left_view.w_axis - mono_view.w_axis;
        let right_offset = right_view.w_axis - mono_view.w_axis;
        prop_assert!((left_offset + right_offset).length() < 1e-4);

        camera.disable_stereo();
        prop_assert_eq!(camera.projection_matrix(), mono_projection);
        prop_assert_eq!(camera.view_matrix(), mono_view);
    }
}
