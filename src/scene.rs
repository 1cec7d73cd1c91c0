//! Scene container and the built-in reference scene

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::hittable::{Geometry, SceneObject};
use crate::light::Light;
use crate::material::{Material, COLOR_BLUE, COLOR_GRAY};
use crate::math::{degrees_to_radians, Vec3};
use crate::plane::Plane;
use crate::shaders::ShaderModel;
use crate::sphere::Sphere;

/// Cameras, lights and objects to render. Read-only once rendering starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Cameras; the first one is used for rendering
    pub cameras: Vec<Camera>,
    /// Light sources
    pub lights: Vec<Light>,
    /// Renderable objects, in tie-breaking order
    pub objects: Vec<SceneObject>,
}

impl Default for Scene {
    /// A blue sphere over a gray floor under one spot light.
    fn default() -> Self {
        let light = Light::spot(
            Vec3::new(0.0, 50.0, 50.0),
            degrees_to_radians(30.0),
            Vec3::Z,
        );
        let sphere = SceneObject::new(
            Sphere::new(Vec3::new(0.0, 0.0, 100.0), 25.0),
            Material::diffuse(COLOR_BLUE),
            ShaderModel::DiffuseSpecular,
        );
        let plane = SceneObject::new(
            Plane::new(Vec3::new(0.0, -25.0, 0.0), Vec3::Y),
            Material::diffuse(COLOR_GRAY),
            ShaderModel::DiffuseColors,
        );
        Self {
            cameras: vec![Camera::default()],
            lights: vec![light],
            objects: vec![sphere, plane],
        }
    }
}

impl Scene {
    /// Camera used for rendering.
    pub fn main_camera(&self) -> Option<&Camera> {
        self.cameras.first()
    }

    /// Reject objects the renderer cannot shade.
    pub fn validate(&self) -> Result<()> {
        match self
            .objects
            .iter()
            .position(|object| matches!(object.geometry, Geometry::HollowSphere(_)))
        {
            Some(index) => Err(Error::InvalidSettings(format!(
                "object {index} is a hollow sphere, which only bounds volumes and cannot be shaded"
            ))),
            None => Ok(()),
        }
    }

    /// Short human readable description.
    pub fn summary(&self) -> String {
        let mut counts = [0usize; 5];
        for object in &self.objects {
            let slot = match object.geometry {
                Geometry::Sphere(_) => 0,
                Geometry::Plane(_) => 1,
                Geometry::Triangle(_) => 2,
                Geometry::Tetrahedron(_) => 3,
                Geometry::HollowSphere(_) => 4,
            };
            counts[slot] += 1;
        }
        format!(
            "{} camera(s), {} light(s), {} object(s) [spheres: {}, planes: {}, triangles: {}, tetrahedra: {}, hollow spheres: {}]",
            self.cameras.len(),
            self.lights.len(),
            self.objects.len(),
            counts[0],
            counts[1],
            counts[2],
            counts[3],
            counts[4],
        )
    }
}
