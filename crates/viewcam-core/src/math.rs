//! Small math helpers shared by the camera family.

use glam::{Mat3, Quat, Vec3};

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns a vector orthogonal to `v` (not normalized).
///
/// Crosses with +Y unless `v` is nearly parallel to it, in which case +X is
/// used instead.
#[must_use]
pub fn orthogonal_vector(v: Vec3) -> Vec3 {
    if v.y.abs() < 0.99 {
        // v x Y
        Vec3::new(-v.z, 0.0, v.x)
    } else {
        // v x X
        Vec3::new(0.0, v.z, -v.y)
    }
}

/// Builds the rotation that takes +Z onto `target_dir` while keeping +Y as
/// close to `up_dir` as possible.
///
/// Zero-length inputs fall back to +Z / +Y. When `up_dir` is parallel to
/// `target_dir` an arbitrary perpendicular up vector is chosen.
#[must_use]
pub fn align_z_axis_with_target(target_dir: Vec3, up_dir: Vec3) -> Quat {
    let target_dir = if target_dir.length_squared() == 0.0 {
        Vec3::Z
    } else {
        target_dir
    };
    let mut up_dir = if up_dir.length_squared() == 0.0 {
        Vec3::Y
    } else {
        up_dir
    };

    if up_dir.cross(target_dir).length_squared() == 0.0 {
        up_dir = target_dir.cross(Vec3::X);
        if up_dir.length_squared() == 0.0 {
            up_dir = target_dir.cross(Vec3::Z);
        }
    }

    let target_perp_dir = up_dir.cross(target_dir);
    let target_up_dir = target_dir.cross(target_perp_dir);

    let basis = Mat3::from_cols(
        target_perp_dir.normalize(),
        target_up_dir.normalize(),
        target_dir.normalize(),
    );
    Quat::from_mat3(&basis).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(-2.0, 2.0, 0.5), 0.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
    }

    #[test]
    fn test_orthogonal_vector() {
        for v in [
            Vec3::X,
            Vec3::Y,
            Vec3::NEG_Z,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, -1.0, 0.001),
        ] {
            let o = orthogonal_vector(v);
            assert!(o.length() > 0.0);
            assert!(o.dot(v).abs() < 1e-5, "{o:?} not orthogonal to {v:?}");
        }
    }

    #[test]
    fn test_align_identity() {
        let q = align_z_axis_with_target(Vec3::Z, Vec3::Y);
        assert!((q * Vec3::X - Vec3::X).length() < 1e-6);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-6);
        assert!((q * Vec3::Z - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_align_respects_up() {
        let target = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = align_z_axis_with_target(target, Vec3::Y);
        assert!((q * Vec3::Z - target).length() < 1e-5);
        // Roll keeps the local up axis in the plane spanned by target and world up.
        let up = q * Vec3::Y;
        assert!(up.dot(target.cross(Vec3::Y)).abs() < 1e-5);
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_align_parallel_up() {
        let q = align_z_axis_with_target(Vec3::Y, Vec3::Y);
        assert!((q * Vec3::Z - Vec3::Y).length() < 1e-5);
        assert!(q.is_normalized());
    }

    #[test]
    fn test_align_zero_inputs() {
        let q = align_z_axis_with_target(Vec3::ZERO, Vec3::ZERO);
        assert!((q * Vec3::Z - Vec3::Z).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn orthogonal_vector_is_orthogonal(x in -10.0f32..10.0, y in -10.0f32..10.0, z in -10.0f32..10.0) {
            let v = Vec3::new(x, y, z);
            prop_assume!(v.length() > 1e-3);
            let o = orthogonal_vector(v);
            prop_assert!(o.dot(v).abs() < 1e-4);
        }

        #[test]
        fn align_maps_z_onto_target(x in -1.0f32..1.0, y in -1.0f32..1.0, z in -1.0f32..1.0) {
            let target = Vec3::new(x, y, z);
            prop_assume!(target.length() > 0.1);
            let q = align_z_axis_with_target(target, Vec3::Y);
            prop_assert!(q.is_normalized());
            prop_assert!((q * Vec3::Z - target.normalize()).length() < 1e-4);
        }
    }
}
