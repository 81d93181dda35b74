//! Configuration presets used when constructing cameras.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{check_clip_range, CameraError, Result};

/// Construction presets for the camera family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Default perspective ("studio view") preset.
    pub perspective: PerspectivePreset,

    /// Default orthographic preset.
    pub orthographic: OrthographicPreset,

    /// Default stereo preset.
    pub stereo: StereoPreset,

    /// Ratio between the pixel-plane distance and the near/far planes chosen by
    /// the pixel-dimension constructors (near = dist / ratio, far = dist * ratio).
    pub pixel_clip_ratio: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            perspective: PerspectivePreset::default(),
            orthographic: OrthographicPreset::default(),
            stereo: StereoPreset::default(),
            pixel_clip_ratio: 10.0,
        }
    }
}

impl CameraOptions {
    /// Parses options from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        log::debug!(
            "loaded camera options (fov {}, clip ratio {})",
            options.perspective.fov_degrees,
            options.pixel_clip_ratio
        );
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every preset describes a usable camera.
    pub fn validate(&self) -> Result<()> {
        self.perspective.validate()?;
        self.orthographic.validate()?;
        self.stereo.validate()?;
        if self.pixel_clip_ratio <= 1.0 {
            return Err(CameraError::InvalidClipRange {
                near: 1.0 / self.pixel_clip_ratio,
                far: self.pixel_clip_ratio,
            });
        }
        Ok(())
    }
}

/// Pose and lens of the default perspective camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectivePreset {
    pub eye: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
    pub center_of_interest: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for PerspectivePreset {
    fn default() -> Self {
        Self {
            eye: Vec3::new(28.0, 21.0, 28.0),
            target: Vec3::ZERO,
            world_up: Vec3::Y,
            center_of_interest: 44.822,
            fov_degrees: 35.0,
            aspect_ratio: 1.0,
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

impl PerspectivePreset {
    fn validate(&self) -> Result<()> {
        if self.world_up.length_squared() == 0.0 {
            return Err(CameraError::ZeroLengthVector("perspective world up"));
        }
        if self.eye == self.target {
            return Err(CameraError::ZeroLengthVector("perspective view direction"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.fov_degrees));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        check_clip_range(self.near_clip, self.far_clip)
    }
}

/// Pose and bounds of the default orthographic camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicPreset {
    pub eye: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
    pub center_of_interest: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for OrthographicPreset {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 0.1),
            target: Vec3::ZERO,
            world_up: Vec3::Y,
            center_of_interest: 0.1,
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near_clip: 0.01,
            far_clip: 1000.0,
        }
    }
}

impl OrthographicPreset {
    fn validate(&self) -> Result<()> {
        if self.world_up.length_squared() == 0.0 {
            return Err(CameraError::ZeroLengthVector("orthographic world up"));
        }
        if self.eye == self.target {
            return Err(CameraError::ZeroLengthVector("orthographic view direction"));
        }
        if self.left == self.right {
            return Err(CameraError::DegenerateFrustum("horizontal"));
        }
        if self.bottom == self.top {
            return Err(CameraError::DegenerateFrustum("vertical"));
        }
        if self.near_clip == self.far_clip {
            return Err(CameraError::InvalidClipRange {
                near: self.near_clip,
                far: self.far_clip,
            });
        }
        Ok(())
    }
}

/// Default stereo rig parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoPreset {
    /// Distance of the zero-parallax plane.
    pub convergence: f32,
    /// Distance between the two eyes.
    pub eye_separation: f32,
    /// Divisor used when eye separation follows the convergence distance.
    pub auto_separation_divisor: f32,
}

impl Default for StereoPreset {
    fn default() -> Self {
        Self {
            convergence: 1.0,
            eye_separation: 0.05,
            auto_separation_divisor: 30.0,
        }
    }
}

impl StereoPreset {
    fn validate(&self) -> Result<()> {
        if self.convergence <= 0.0 {
            return Err(CameraError::InvalidConvergence(self.convergence));
        }
        if self.auto_separation_divisor <= 0.0 {
            return Err(CameraError::InvalidConvergence(self.auto_separation_divisor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = CameraOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.perspective.fov_degrees, 35.0);
        assert_eq!(options.stereo.eye_separation, 0.05);
        assert_eq!(options.pixel_clip_ratio, 10.0);
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            CameraOptions::from_json(r#"{ "perspective": { "fov_degrees": 60.0 } }"#).unwrap();
        assert_eq!(options.perspective.fov_degrees, 60.0);
        // Unspecified fields keep their defaults
        assert_eq!(options.perspective.near_clip, 0.1);
        assert_eq!(options.stereo, StereoPreset::default());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let mut options = CameraOptions::default();
        options.stereo.convergence = 4.0;
        let json = options.to_json().unwrap();
        assert_eq!(CameraOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = CameraOptions::from_json(r#"{ "perspective": { "near_clip": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, CameraError::InvalidClipRange { .. }));

        let err = CameraOptions::from_json(r#"{ "stereo": { "convergence": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, CameraError::InvalidConvergence(_)));

        let err = CameraOptions::from_json("not json").unwrap_err();
        assert!(matches!(err, CameraError::Json(_)));
    }

    #[test]
    fn test_validate_orthographic_bounds() {
        let mut options = CameraOptions::default();
        options.orthographic.left = 1.0;
        assert!(matches!(
            options.validate(),
            Err(CameraError::DegenerateFrustum("horizontal"))
        ));
    }
}
