//! Pinhole camera for primary ray generation

use serde::{Deserialize, Serialize};

use crate::math::{degrees_to_radians, normalize, Vec3};
use crate::ray::Ray;

/// Pinhole camera.
///
/// The image plane sits one unit along `view`; `fov` spans the image height.
/// Camera right is `up × view`, so with `view = +Z` and `up = +Y` the image x
/// axis runs along world +X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Position in world space
    pub position: Vec3,
    /// Viewing direction
    pub view: Vec3,
    /// Camera-relative "up" direction
    pub up: Vec3,
    /// Vertical field of view in degrees (default: 90)
    #[serde(default = "default_fov")]
    pub fov: f64,
}

fn default_fov() -> f64 {
    90.0
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, Vec3::Y)
    }
}

impl Camera {
    /// Creates a camera with the default 90 degree field of view.
    pub fn new(position: Vec3, view: Vec3, up: Vec3) -> Self {
        Self {
            position,
            view: normalize(view),
            up: normalize(up),
            fov: default_fov(),
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Orthonormal `(right, up, forward)` frame.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let w = normalize(self.view);
        let u = normalize(self.up.cross(w));
        let v = w.cross(u);
        (u, v, w)
    }

    /// Unit ray through continuous image coordinates `(x, y)`.
    ///
    /// `(0, 0)` is the top-left corner of the image and `(width, height)` the
    /// bottom-right one; pixel `(i, j)` covers `[i, i + 1) × [j, j + 1)`.
    pub fn ray_through(&self, x: f64, y: f64, width: u32, height: u32) -> Ray {
        let (u, v, w) = self.basis();
        let half_height = (degrees_to_radians(self.fov) / 2.0).tan();
        let half_width = half_height * f64::from(width) / f64::from(height.max(1));

        let sx = (2.0 * x / f64::from(width.max(1)) - 1.0) * half_width;
        let sy = (1.0 - 2.0 * y / f64::from(height.max(1))) * half_height;
        Ray::new(self.position, normalize(w + u * sx + v * sy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_of_default_camera() {
        let (u, v, w) = Camera::default().basis();
        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
        assert!((w - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_center_ray_follows_view() {
        let camera = Camera::default();
        let ray = camera.ray_through(100.0, 100.0, 200, 200);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_rays_span_fov() {
        let camera = Camera::default();
        let top_left = camera.ray_through(0.0, 0.0, 200, 200);
        let expected = normalize(Vec3::new(-1.0, 1.0, 1.0));
        assert!((top_left.direction - expected).length() < 1e-12);

        let bottom_right = camera.ray_through(200.0, 200.0, 200, 200);
        let expected = normalize(Vec3::new(1.0, -1.0, 1.0));
        assert!((bottom_right.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontally() {
        let camera = Camera::default().with_fov(60.0);
        let ray = camera.ray_through(400.0, 100.0, 400, 200);
        let half_height = (30.0_f64).to_radians().tan();
        let expected = normalize(Vec3::new(2.0 * half_height, 0.0, 1.0));
        assert!((ray.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_missing_fov_defaults() {
        let camera: Camera = ron::from_str(
            "(position: (0.0, 0.0, 0.0), view: (0.0, 0.0, 1.0), up: (0.0, 1.0, 0.0))",
        )
        .unwrap();
        assert_eq!(camera.fov, 90.0);
    }
}
