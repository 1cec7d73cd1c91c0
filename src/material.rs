//! Surface material descriptors.
//!
//! Materials are plain value holders read by the shading stage. Colors use the
//! byte scale `[0, 255]` so shader outputs land directly in pixel range.

use serde::{Deserialize, Serialize};

use crate::math::Color;

/// Neutral gray.
pub const COLOR_GRAY: Color = Color::new(128.0, 128.0, 128.0);
/// Saturated blue.
pub const COLOR_BLUE: Color = Color::new(0.0, 0.0, 255.0);
/// Saturated red.
pub const COLOR_RED: Color = Color::new(255.0, 0.0, 0.0);
/// Saturated green.
pub const COLOR_GREEN: Color = Color::new(0.0, 255.0, 0.0);
/// White.
pub const COLOR_WHITE: Color = Color::new(255.0, 255.0, 255.0);

/// Reflectance class of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reflectance {
    /// Matte surface lit only by local shading.
    #[default]
    Diffuse,
}

/// Material of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse color on the byte scale.
    pub diffuse: Color,
    /// Reflectance class.
    #[serde(default)]
    pub reflectance: Reflectance,
}

impl Material {
    /// Create a material.
    pub fn new(diffuse: Color, reflectance: Reflectance) -> Self {
        Self {
            diffuse,
            reflectance,
        }
    }

    /// Diffuse material of the given color.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, Reflectance::Diffuse)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(COLOR_GRAY)
    }
}
