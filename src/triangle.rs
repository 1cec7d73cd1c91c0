//! Triangle and tetrahedron primitives.
//!
//! A triangle is intersected through its supporting plane followed by a
//! barycentric containment test. A tetrahedron is never stored as a mesh: its
//! four faces are built on demand for each query.

use serde::{Deserialize, Serialize};

use crate::hittable::{Hittable, NO_HIT};
use crate::interval::Interval;
use crate::math::{normalize, Vec3};
use crate::plane::Plane;
use crate::ray::Ray;

/// Triangle defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Vertices in winding order. The normal follows `(v1 - v0) x (v2 - v0)`.
    pub vertices: [Vec3; 3],
}

impl Triangle {
    /// Create a triangle from its three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Supporting plane: first vertex and normalized edge cross product.
    ///
    /// The normal is zero for a degenerate (collinear) triangle.
    pub fn plane(&self) -> Plane {
        let [a, b, c] = self.vertices;
        Plane::new(a, normalize((b - a).cross(c - a)))
    }

    /// Barycentric coordinates `(s, t)` of `p` such that
    /// `p - v0 = s (v1 - v0) + t (v2 - v0)`.
    ///
    /// `p` is projected onto the edge basis, so points off the plane still get
    /// coordinates. Returns `None` for a degenerate triangle.
    pub fn barycentric(&self, p: Vec3) -> Option<(f64, f64)> {
        let [a, b, c] = self.vertices;
        let e1 = b - a;
        let e2 = c - a;
        let w = p - a;

        let d11 = e1.dot(e1);
        let d12 = e1.dot(e2);
        let d22 = e2.dot(e2);
        let w1 = w.dot(e1);
        let w2 = w.dot(e2);

        let denom = d11 * d22 - d12 * d12;
        if denom == 0.0 {
            return None;
        }
        let s = (d22 * w1 - d12 * w2) / denom;
        let t = (d11 * w2 - d12 * w1) / denom;
        Some((s, t))
    }

    /// Whether barycentric `(s, t)` lies inside the unit triangle.
    pub fn contains_barycentric(s: f64, t: f64) -> bool {
        Interval::UNIT.contains(s) && Interval::UNIT.contains(t) && Interval::UNIT.contains(s + t)
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> f64 {
        let ray_t = self.plane().intersect(ray);
        if ray_t < 0.0 {
            return NO_HIT;
        }
        match self.barycentric(ray.at(ray_t)) {
            Some((s, t)) if Self::contains_barycentric(s, t) => ray_t,
            _ => NO_HIT,
        }
    }

    fn normal_at(&self, _p: Vec3) -> Option<Vec3> {
        let normal = self.plane().normal;
        (normal != Vec3::ZERO).then_some(normal)
    }
}

/// Tetrahedron defined by four vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    /// The four corner points.
    pub vertices: [Vec3; 4],
}

impl Tetrahedron {
    /// Create a tetrahedron from its four vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self {
            vertices: [a, b, c, d],
        }
    }

    /// The four triangular faces.
    pub fn triangles(&self) -> [Triangle; 4] {
        let [a, b, c, d] = self.vertices;
        [
            Triangle::new(a, b, c),
            Triangle::new(a, b, d),
            Triangle::new(a, c, d),
            Triangle::new(b, c, d),
        ]
    }

    fn centroid(&self) -> Vec3 {
        let [a, b, c, d] = self.vertices;
        (a + b + c + d) / 4.0
    }

    fn longest_edge(&self) -> f64 {
        let v = self.vertices;
        let mut longest: f64 = 0.0;
        for i in 0..4 {
            for j in (i + 1)..4 {
                longest = longest.max((v[i] - v[j]).length());
            }
        }
        longest
    }
}

impl Hittable for Tetrahedron {
    fn intersect(&self, ray: &Ray) -> f64 {
        let mut min_t = f64::INFINITY;
        for triangle in self.triangles() {
            let t = triangle.intersect(ray);
            if Interval::new(0.0, min_t).surrounds(t) {
                min_t = t;
            }
        }
        if min_t == f64::INFINITY {
            return NO_HIT;
        }
        min_t
    }

    /// Outward normal of the face `p` lies on, or `None` when `p` is on no face.
    fn normal_at(&self, p: Vec3) -> Option<Vec3> {
        let tolerance = 1e-6 * self.longest_edge().max(1.0);
        let centroid = self.centroid();

        let mut best: Option<(f64, Vec3)> = None;
        for face in self.triangles() {
            let plane = face.plane();
            if plane.normal == Vec3::ZERO {
                continue;
            }
            let offset = (p - plane.point).dot(plane.normal).abs();
            if offset > tolerance {
                continue;
            }
            let on_face = face
                .barycentric(p)
                .is_some_and(|(s, t)| Triangle::contains_barycentric(s, t));
            if !on_face {
                continue;
            }
            if best.map_or(true, |(closest, _)| offset < closest) {
                let outward = if plane.normal.dot(plane.point - centroid) < 0.0 {
                    -plane.normal
                } else {
                    plane.normal
                };
                best = Some((offset, outward));
            }
        }
        best.map(|(_, normal)| normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        )
    }

    fn unit_tetrahedron() -> Tetrahedron {
        Tetrahedron::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_barycentric_centroid() {
        let tri = floor_triangle();
        let (s, t) = tri.barycentric(tri.centroid()).unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-12);
        assert!((t - 1.0 / 3.0).abs() < 1e-12);
        assert!(Triangle::contains_barycentric(s, t));
    }

    #[test]
    fn test_barycentric_vertices() {
        let tri = floor_triangle();
        let (s, t) = tri.barycentric(Vec3::new(4.0, 0.0, 0.0)).unwrap();
        assert!((s - 1.0).abs() < 1e-12 && t.abs() < 1e-12);
        let (s, t) = tri.barycentric(Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert!(s.abs() < 1e-12 && (t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_through_centroid() {
        let tri = floor_triangle();
        let c = tri.centroid();
        let ray = Ray::new(c + Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!((tri.intersect(&ray) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_plane_hit_outside_triangle_rejected() {
        let tri = floor_triangle();
        // Inside the parallelogram spanned by the edges, beyond the hypotenuse.
        let ray = Ray::new(Vec3::new(3.0, 10.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(tri.plane().intersect(&ray) > 0.0);
        let (s, t) = tri.barycentric(Vec3::new(3.0, 0.0, 3.0)).unwrap();
        assert!(s + t > 1.0);
        assert_eq!(tri.intersect(&ray), NO_HIT);

        // Outside the parallelogram entirely.
        let ray = Ray::new(Vec3::new(-2.0, 10.0, 1.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(tri.plane().intersect(&ray) > 0.0);
        assert_eq!(tri.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(tri.barycentric(Vec3::X), None);
        assert_eq!(tri.normal_at(Vec3::X), None);
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(tri.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_tetrahedron_nearest_face() {
        let tet = unit_tetrahedron();
        let ray = Ray::new(Vec3::new(0.2, 0.2, -5.0), Vec3::new(0.0, 0.0, 1.0));
        // Enters through the z = 0 face, leaves through the slanted face.
        assert!((tet.intersect(&ray) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_tetrahedron_miss() {
        let tet = unit_tetrahedron();
        let ray = Ray::new(Vec3::new(2.0, 2.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tet.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_tetrahedron_outward_normals() {
        let tet = unit_tetrahedron();
        let n = tet.normal_at(Vec3::new(0.2, 0.2, 0.0)).unwrap();
        assert!((n - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);

        let slanted = tet.normal_at(Vec3::splat(1.0 / 3.0)).unwrap();
        let expected = Vec3::splat(1.0).normalize();
        assert!((slanted - expected).length() < 1e-9);

        assert_eq!(tet.normal_at(Vec3::splat(0.1)), None);
    }
}
