//! viewcam: perspective, orthographic and stereo cameras for 3D rendering.
//!
//! Every camera keeps its pose (eye point, orientation, world up, center of
//! interest) and lens parameters, and lazily rebuilds its view and projection
//! matrices the first time they are queried after a change.
//!
//! # Quick Start
//!
//! ```
//! use viewcam::*;
//!
//! let mut camera = PerspectiveCamera::from_pixels(800, 600, 50.0);
//! camera.look_at_from_up(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
//!
//! // The origin projects to the middle of the screen.
//! let screen = camera.world_to_screen(Vec3::ZERO, 800.0, 600.0);
//! assert!((screen - Vec2::new(400.0, 300.0)).length() < 1e-3);
//!
//! // Rays through the image center follow the view direction.
//! let ray = camera.generate_ray(0.5, 0.5, 800.0 / 600.0);
//! assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
//! ```
//!
//! # Cameras
//!
//! - [`PerspectiveCamera`] - field of view, aspect ratio, lens shift, sphere framing
//! - [`OrthographicCamera`] - explicit box bounds
//! - [`StereoCamera`] - a perspective camera with left and right eye matrices
//!
//! All of them implement [`Camera`], which carries the pose mutators and the
//! screen/world queries.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Exact float comparisons are intentional for unset lens shifts
#![allow(clippy::float_cmp)]
// Naming lints - matrix math uses short, similar names
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

mod camera;
mod orthographic;
mod perspective;
mod stereo;

pub use camera::{Camera, CameraBase, ClipCorners, FrustumBounds};
pub use orthographic::OrthographicCamera;
pub use perspective::PerspectiveCamera;
pub use stereo::{StereoCamera, StereoEye};

// Re-export core types
pub use viewcam_core::{
    error::{CameraError, Result},
    math,
    options::{CameraOptions, OrthographicPreset, PerspectivePreset, StereoPreset},
    ray::Ray,
    sphere::Sphere,
    uniforms::CameraUniforms,
    Mat4, Quat, Vec2, Vec3, Vec4,
};
