//! Viewport bounds
//!
//! The visible half-height of the world at the camera's depth, and the
//! camera description the bounds are derived from.

use std::ops::Range;

use glam::Vec3;

use crate::params::Params;

/// Half the vertical span of a pinhole camera's view at `distance`.
///
/// `distance * tan(fov / 2)`. Inputs are not validated: a field of view of
/// 180° or more, or a non-finite distance, gives a meaningless result.
pub fn compute_half_extent(distance: f32, vertical_fov_degrees: f32) -> f32 {
    distance * (vertical_fov_degrees.to_radians() / 2.0).tan()
}

/// Perspective camera as seen by the simulation.
///
/// The simulation only reads it; boundaries are recomputed from it every
/// time they are needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, Params::CAMERA_DISTANCE),
            fov_degrees: Params::CAMERA_FOV_DEGREES,
            aspect: 1.0,
            near: Params::CAMERA_NEAR,
            far: Params::CAMERA_FAR,
        }
    }
}

impl CameraRig {
    /// Default camera for a viewport of `width` x `height` pixels
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    /// Visible half-height at the origin plane
    pub fn half_extent(&self) -> f32 {
        compute_half_extent(self.position.z, self.fov_degrees)
    }

    /// Height new boxes appear at
    pub fn top_y(&self) -> f32 {
        self.position.y + self.half_extent()
    }

    /// Height boxes bounce on
    pub fn floor_y(&self) -> f32 {
        -(self.position.y + self.half_extent())
    }

    /// Horizontal spawn range.
    ///
    /// The right bound is offset by the camera x on top of a half-width that
    /// already includes it, so the range is only centred on the view when the
    /// camera sits at x = 0.
    pub fn spawn_x_range(&self) -> Range<f32> {
        let x_right = self.position.x + self.half_extent();
        (self.position.x - x_right)..(self.position.x + x_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_half_extent_default_camera() {
        assert_abs_diff_eq!(compute_half_extent(10.0, 75.0), 7.673, epsilon = 1e-3);
    }

    #[rstest]
    #[case(1.0, 90.0, 1.0)]
    #[case(5.0, 90.0, 5.0)]
    #[case(10.0, 60.0, 5.773_503)]
    #[case(0.0, 75.0, 0.0)]
    #[case(-10.0, 75.0, -7.673_27)]
    fn test_half_extent_cases(#[case] distance: f32, #[case] fov: f32, #[case] expected: f32) {
        assert_abs_diff_eq!(compute_half_extent(distance, fov), expected, epsilon = 1e-3);
    }

    #[test]
    fn test_boundaries_symmetric_about_origin() {
        let camera = CameraRig::default();
        assert_eq!(camera.top_y(), camera.half_extent());
        assert_eq!(camera.floor_y(), -camera.top_y());
    }

    #[test]
    fn test_boundaries_follow_camera_height() {
        let camera = CameraRig {
            position: Vec3::new(0.0, 2.0, 10.0),
            ..CameraRig::default()
        };
        let h = camera.half_extent();
        assert_eq!(camera.top_y(), 2.0 + h);
        assert_eq!(camera.floor_y(), -(2.0 + h));
    }

    #[test]
    fn test_spawn_range_centred_at_origin() {
        let camera = CameraRig::default();
        let h = camera.half_extent();
        assert_eq!(camera.spawn_x_range(), -h..h);
    }

    #[test]
    fn test_spawn_range_counts_camera_x_twice_on_the_right() {
        let camera = CameraRig {
            position: Vec3::new(3.0, 0.0, 10.0),
            ..CameraRig::default()
        };
        let h = camera.half_extent();
        let range = camera.spawn_x_range();
        assert_abs_diff_eq!(range.start, -h, epsilon = 1e-5);
        assert_abs_diff_eq!(range.end, 6.0 + h, epsilon = 1e-5);
    }

    #[test]
    fn test_for_viewport_aspect() {
        let camera = CameraRig::for_viewport(1600, 900);
        assert_abs_diff_eq!(camera.aspect, 16.0 / 9.0, epsilon = 1e-6);
        assert_eq!(CameraRig::for_viewport(640, 0).aspect, 640.0);
    }
}
