//! Error types for viewcam.

use thiserror::Error;

/// The main error type for viewcam operations.
///
/// Camera math never fails; these errors come from option loading and the
/// opt-in `validate()` checks on cameras.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Near plane is not positive or does not lie in front of the far plane.
    #[error("invalid clip range: near {near}, far {far}")]
    InvalidClipRange { near: f32, far: f32 },

    /// Opposite frustum bounds coincide.
    #[error("degenerate frustum: {0} extent is zero")]
    DegenerateFrustum(&'static str),

    /// Vertical field of view outside (0, 180) degrees.
    #[error("invalid field of view: {0} degrees")]
    InvalidFieldOfView(f32),

    /// Aspect ratio is not positive.
    #[error("invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),

    /// Stereo convergence distance is not positive.
    #[error("invalid convergence distance: {0}")]
    InvalidConvergence(f32),

    /// A direction vector has zero length and cannot be normalized.
    #[error("zero-length vector: {0}")]
    ZeroLengthVector(&'static str),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for viewcam operations.
pub type Result<T> = std::result::Result<T, CameraError>;

/// Checks a near/far pair the way projection construction needs it.
pub fn check_clip_range(near: f32, far: f32) -> Result<()> {
    if near > 0.0 && near < far {
        Ok(())
    } else {
        Err(CameraError::InvalidClipRange { near, far })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_clip_range() {
        assert!(check_clip_range(0.1, 100.0).is_ok());
        assert!(matches!(
            check_clip_range(0.0, 100.0),
            Err(CameraError::InvalidClipRange { .. })
        ));
        assert!(check_clip_range(10.0, 10.0).is_err());
        assert!(check_clip_range(-1.0, 10.0).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = CameraError::InvalidClipRange {
            near: 2.0,
            far: 1.0,
        };
        assert_eq!(err.to_string(), "invalid clip range: near 2, far 1");
        assert_eq!(
            CameraError::DegenerateFrustum("horizontal").to_string(),
            "degenerate frustum: horizontal extent is zero"
        );
    }
}
