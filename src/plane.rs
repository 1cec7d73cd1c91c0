//! Infinite plane primitive.

use serde::{Deserialize, Serialize};

use crate::hittable::{Hittable, NO_HIT};
use crate::math::Vec3;
use crate::ray::Ray;

/// Plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Any point lying on the plane.
    pub point: Vec3,
    /// Unit normal of the plane.
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane from a point and a unit normal.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }
}

impl Hittable for Plane {
    /// A ray parallel to the plane returns `0.0` when its origin lies in the
    /// plane (coincident, never accepted as a forward hit) and [`NO_HIT`]
    /// otherwise.
    fn intersect(&self, ray: &Ray) -> f64 {
        let dot_normals = ray.direction.dot(self.normal);
        let offset = (self.point - ray.origin).dot(self.normal);
        if dot_normals == 0.0 {
            return if offset == 0.0 { 0.0 } else { NO_HIT };
        }
        let t = offset / dot_normals;
        if t < 0.0 {
            return NO_HIT;
        }
        t
    }

    fn normal_at(&self, _p: Vec3) -> Option<Vec3> {
        (self.normal != Vec3::ZERO).then_some(self.normal)
    }
}
