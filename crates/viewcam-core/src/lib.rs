//! Core primitives for viewcam.
//!
//! This crate provides the types shared by the camera family:
//! - [`CameraError`] and the [`Result`] alias
//! - [`CameraOptions`] construction presets (loadable from JSON)
//! - [`Sphere`] and [`Ray`] value types
//! - [`CameraUniforms`] for feeding camera transforms to a GPU pipeline
//! - small math helpers in [`math`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Exact float comparisons are intentional for zero-length checks
#![allow(clippy::float_cmp)]

pub mod error;
pub mod math;
pub mod options;
pub mod ray;
pub mod sphere;
pub mod uniforms;

pub use error::{CameraError, Result};
pub use options::{CameraOptions, OrthographicPreset, PerspectivePreset, StereoPreset};
pub use ray::Ray;
pub use sphere::Sphere;
pub use uniforms::CameraUniforms;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
