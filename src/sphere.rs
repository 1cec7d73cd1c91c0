//! Sphere primitives for ray tracing.
//!
//! [`Sphere`] is a shaded surface hit from outside only. [`HollowSphere`] shares
//! the same quadratic but also reports the exit root, so rays starting inside
//! the shell (the sky dome's atmosphere) find where they leave it.

use serde::{Deserialize, Serialize};

use crate::hittable::{Hittable, NO_HIT};
use crate::interval::Interval;
use crate::math::{normalize, Vec3};
use crate::ray::Ray;

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

/// Reduced quadratic terms `(b, discriminant)` for a unit-direction ray.
fn quadratic(center: Vec3, radius: f64, ray: &Ray) -> (f64, f64) {
    let dif = ray.origin - center;
    let b = ray.direction.dot(dif);
    let c = dif.length_squared() - radius * radius;
    (b, b * b - c)
}

impl Hittable for Sphere {
    /// Near-side hit only: a ray moving away from the center (`b > 0`) misses,
    /// and an origin inside the sphere yields a non-positive `t`.
    fn intersect(&self, ray: &Ray) -> f64 {
        let (b, discriminant) = quadratic(self.center, self.radius, ray);
        if b > 0.0 || discriminant < 0.0 {
            return NO_HIT;
        }
        -b - discriminant.sqrt()
    }

    fn normal_at(&self, p: Vec3) -> Option<Vec3> {
        let outward = p - self.center;
        if outward == Vec3::ZERO {
            return None;
        }
        Some(normalize(outward))
    }
}

/// Spherical shell used purely as an intersection boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HollowSphere {
    /// Center point of the shell.
    pub center: Vec3,
    /// Radius of the shell.
    pub radius: f64,
}

impl HollowSphere {
    /// Create a new shell. Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Hittable for HollowSphere {
    fn intersect(&self, ray: &Ray) -> f64 {
        let (b, discriminant) = quadratic(self.center, self.radius, ray);
        if discriminant < 0.0 {
            return NO_HIT;
        }
        let root = discriminant.sqrt();
        [-b - root, -b + root]
            .into_iter()
            .find(|&t| Interval::FORWARD.surrounds(t))
            .unwrap_or(NO_HIT)
    }

    /// Points toward the center, the side seen from inside the shell.
    fn normal_at(&self, p: Vec3) -> Option<Vec3> {
        let inward = self.center - p;
        if inward == Vec3::ZERO {
            return None;
        }
        Some(normalize(inward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_sphere_hit_near_side() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 25.0);
        assert!((sphere.intersect(&forward_ray()) - 75.0).abs() < 1e-9);

        let smaller = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 10.0);
        assert!((smaller.intersect(&forward_ray()) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 25.0);
        let away = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(sphere.intersect(&away), NO_HIT);
    }

    #[test]
    fn test_sphere_offset_ray_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 100.0), 25.0);
        let ray = Ray::new(Vec3::new(30.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(sphere.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_sphere_origin_inside_is_not_forward_hit() {
        let sphere = Sphere::new(Vec3::ZERO, 5.0);
        let t = sphere.intersect(&forward_ray());
        assert!(t <= 0.0, "inside origin must not report a forward hit, got {t}");
    }

    #[test]
    fn test_negative_radius_clamped() {
        assert_eq!(Sphere::new(Vec3::ZERO, -3.0).radius, 0.0);
        assert_eq!(HollowSphere::new(Vec3::ZERO, -3.0).radius, 0.0);
    }

    #[test]
    fn test_sphere_normal_undefined_at_center() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0);
        assert_eq!(sphere.normal_at(Vec3::new(1.0, 2.0, 3.0)), None);
        let n = sphere.normal_at(Vec3::new(1.0, 4.0, 3.0)).unwrap();
        assert!((n - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_hollow_sphere_exit_from_inside() {
        let shell = HollowSphere::new(Vec3::ZERO, 10.0);
        let up = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!((shell.intersect(&up) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_hollow_sphere_entry_from_outside() {
        let shell = HollowSphere::new(Vec3::new(0.0, 0.0, 100.0), 25.0);
        assert!((shell.intersect(&forward_ray()) - 75.0).abs() < 1e-9);
        let away = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(shell.intersect(&away), NO_HIT);
    }

    #[test]
    fn test_hollow_sphere_normal_points_inward() {
        let shell = HollowSphere::new(Vec3::ZERO, 10.0);
        let n = shell.normal_at(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!((n + Vec3::X).length() < 1e-12);
    }
}
