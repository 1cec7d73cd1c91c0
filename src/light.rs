//! Light sources.

use serde::{Deserialize, Serialize};

use crate::math::{distance, normalize, Vec3};

/// Kind of light source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Omnidirectional point light.
    Point,
    /// Point light with a cutoff cone.
    #[default]
    Spot,
}

/// A positional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Position in world space.
    pub position: Vec3,
    /// Light kind.
    #[serde(default)]
    pub kind: LightKind,
    /// Cutoff half-angle of the cone, in radians.
    pub angle: f64,
    /// Unit direction the cone is aimed along.
    pub direction: Vec3,
}

impl Light {
    /// Create a light. `direction` is normalized.
    pub fn new(position: Vec3, kind: LightKind, angle: f64, direction: Vec3) -> Self {
        Self {
            position,
            kind,
            angle,
            direction: normalize(direction),
        }
    }

    /// Spot light aimed along `direction` with cutoff half-angle `angle` (radians).
    pub fn spot(position: Vec3, angle: f64, direction: Vec3) -> Self {
        Self::new(position, LightKind::Spot, angle, direction)
    }

    /// Unit vector from `p` toward the light.
    pub fn direction_from(&self, p: Vec3) -> Vec3 {
        normalize(self.position - p)
    }

    /// Distance from `p` to the light.
    pub fn distance_from(&self, p: Vec3) -> f64 {
        distance(self.position, p)
    }
}
