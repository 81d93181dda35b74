#![allow(clippy::cast_precision_loss)]
//! Demo of the camera family in viewcam.
//!
//! Builds a pixel-plane camera, frames a bounding sphere around a small point
//! set, and prints the per-eye matrices of a stereo rig.
//!
//! Run with `RUST_LOG=info` for the results, `RUST_LOG=debug` to add framing
//! and option logging, or `RUST_LOG=trace` to watch the lazy matrix rebuilds.

use viewcam::{
    Camera, CameraOptions, OrthographicCamera, PerspectiveCamera, Sphere, StereoCamera, StereoEye,
    Vec3,
};

fn main() -> viewcam::Result<()> {
    env_logger::init();

    let options = CameraOptions::from_json(r#"{ "stereo": { "convergence": 6.0 } }"#)?;

    // Pixel-plane camera: the 800x600 plane at z = 0 fills the view.
    let mut pixels = PerspectiveCamera::from_pixels_with_options(800, 600, 50.0, &options);
    pixels.validate()?;
    let frustum = pixels.frustum();
    log::info!(
        "pixel camera at {:?}, frustum {:.3} x {:.3}, clip [{:.2}, {:.2}]",
        pixels.eye_point(),
        frustum.width(),
        frustum.height(),
        frustum.near,
        frustum.far
    );
    let corner = pixels.world_to_screen(Vec3::new(800.0, 600.0, 0.0), 800.0, 600.0);
    log::info!("pixel (800, 600) lands on screen {corner:?}");

    // Frame a point set with the studio camera.
    let points: Vec<Vec3> = (0..12)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 12.0;
            Vec3::new(angle.cos() * 3.0, (i % 3) as f32 - 1.0, angle.sin() * 2.0)
        })
        .collect();
    let Some(bounds) = Sphere::from_points(&points) else {
        log::warn!("no points to frame");
        return Ok(());
    };

    let studio = PerspectiveCamera::from_options(&options);
    for iterations in [0, 4, 16, 32] {
        let mut framed = studio.frame_sphere(&bounds, iterations);
        log::info!(
            "{iterations:>2} iterations: distance {:.4}, screen radius {:.4}",
            framed.center_of_interest(),
            framed.screen_radius(&bounds, 2.0, 2.0)
        );
    }

    let ray = studio.frame_sphere(&bounds, 32).generate_ray(0.5, 0.5, 1.0);
    log::info!("center ray {:?} -> {:?}", ray.origin, ray.direction);

    // Stereo rig converging on the sphere center.
    let mut stereo = StereoCamera::from_options(&options);
    stereo.look_at_from_up(Vec3::new(0.0, 1.0, 6.0), bounds.center(), Vec3::Y);
    stereo.set_convergence(stereo.eye_point().distance(bounds.center()), true);
    stereo.validate()?;
    stereo.enable_stereo_left();
    for eye in [StereoEye::Left, StereoEye::Right] {
        stereo.set_active_eye(eye);
        log::info!(
            "{eye:?} eye at {:?}\n  view {:?}\n  projection {:?}",
            stereo.shifted_eye_point(),
            stereo.view_matrix(),
            stereo.projection_matrix()
        );
    }

    let mut ortho = OrthographicCamera::with_bounds(-4.0, 4.0, -3.0, 3.0, 0.1, 100.0);
    ortho.look_at_from(Vec3::new(0.0, 0.0, 10.0), bounds.center());
    ortho.validate()?;
    let corners = ortho.far_clip_coordinates();
    log::info!("orthographic far plane corners {:?}", corners.to_array());

    Ok(())
}
