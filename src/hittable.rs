//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait implemented by each primitive, the closed
//! [`Geometry`] enum that dispatches over every supported kind, and
//! [`SceneObject`], which pairs geometry with the material and shader model
//! used when it is hit.

use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::math::Vec3;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::shaders::ShaderModel;
use crate::sphere::{HollowSphere, Sphere};
use crate::triangle::{Tetrahedron, Triangle};

/// Sentinel returned by [`Hittable::intersect`] when nothing lies ahead of the ray.
pub const NO_HIT: f64 = -1.0;

/// Trait for objects that can be intersected by rays.
pub trait Hittable {
    /// Parametric distance to the nearest forward intersection.
    ///
    /// Any value `<= 0.0` (usually [`NO_HIT`]) means no valid hit.
    fn intersect(&self, ray: &Ray) -> f64;

    /// Unit surface normal at a point on the surface, `None` when undefined.
    fn normal_at(&self, p: Vec3) -> Option<Vec3>;
}

/// Every primitive kind supported by the tracer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Solid sphere.
    Sphere(Sphere),
    /// Infinite plane.
    Plane(Plane),
    /// Single triangle.
    Triangle(Triangle),
    /// Tetrahedron intersected as its four faces.
    Tetrahedron(Tetrahedron),
    /// Boundary shell for volume bounds such as the sky dome atmosphere.
    ///
    /// Never shaded: [`crate::scene::Scene::validate`] rejects scenes that
    /// list one as an object.
    HollowSphere(HollowSphere),
}

impl Hittable for Geometry {
    fn intersect(&self, ray: &Ray) -> f64 {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
            Geometry::Triangle(triangle) => triangle.intersect(ray),
            Geometry::Tetrahedron(tetrahedron) => tetrahedron.intersect(ray),
            Geometry::HollowSphere(shell) => shell.intersect(ray),
        }
    }

    fn normal_at(&self, p: Vec3) -> Option<Vec3> {
        match self {
            Geometry::Sphere(sphere) => sphere.normal_at(p),
            Geometry::Plane(plane) => plane.normal_at(p),
            Geometry::Triangle(triangle) => triangle.normal_at(p),
            Geometry::Tetrahedron(tetrahedron) => tetrahedron.normal_at(p),
            Geometry::HollowSphere(shell) => shell.normal_at(p),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Self {
        Geometry::Plane(plane)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

impl From<Tetrahedron> for Geometry {
    fn from(tetrahedron: Tetrahedron) -> Self {
        Geometry::Tetrahedron(tetrahedron)
    }
}

impl From<HollowSphere> for Geometry {
    fn from(shell: HollowSphere) -> Self {
        Geometry::HollowSphere(shell)
    }
}

/// A shaded object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Shape used for intersection.
    pub geometry: Geometry,
    /// Surface material.
    #[serde(default)]
    pub material: Material,
    /// Shading strategy applied at hit points.
    #[serde(default)]
    pub shader: ShaderModel,
}

impl SceneObject {
    /// Create a scene object.
    pub fn new(geometry: impl Into<Geometry>, material: Material, shader: ShaderModel) -> Self {
        Self {
            geometry: geometry.into(),
            material,
            shader,
        }
    }
}

impl Hittable for SceneObject {
    fn intersect(&self, ray: &Ray) -> f64 {
        self.geometry.intersect(ray)
    }

    fn normal_at(&self, p: Vec3) -> Option<Vec3> {
        self.geometry.normal_at(p)
    }
}
