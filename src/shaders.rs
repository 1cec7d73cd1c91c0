//! Local shading models.
//!
//! Each shader maps a unit normal `n`, unit light direction `l` (surface to
//! light), unit eye direction (surface to camera) and a dark/light color pair
//! to an RGB contribution on the byte scale. Results are not clamped here; the
//! compositing stage clamps after averaging lights.

use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::math::{Color, Vec3};

/// Highlight color added by the specular term.
pub const COLOR_FOR_LIGHT: Color = Color::new(255.0, 255.0, 255.0);
/// Silhouette color added by the border term.
pub const COLOR_FOR_BORDER: Color = Color::new(185.0, 185.0, 185.0);
/// Default specular blend factor.
pub const DEFAULT_KS: f64 = 0.8;
/// Default lower edge of the border window.
pub const DEFAULT_THICKNESS: f64 = 0.7;

const SPECULAR_STEP_MIN: f64 = 0.73;
const SPECULAR_STEP_MAX: f64 = 1.0;

/// Shading strategy attached to a scene object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShaderModel {
    /// Grayscale Lambert term only.
    #[serde(rename = "diffuse_light")]
    DiffuseLight,
    /// Lambert blend between dark and light colors.
    #[default]
    #[serde(rename = "diffuse_colors")]
    DiffuseColors,
    /// Diffuse blend plus a sharp toon highlight.
    #[serde(rename = "diffuse_with_specular")]
    DiffuseSpecular,
    /// Diffuse, highlight and a silhouette border.
    #[serde(rename = "diffuse_specular_border")]
    DiffuseSpecularBorder,
}

impl ShaderModel {
    /// Evaluate this shader with the default `ks` and border thickness.
    pub fn shade(self, n: Vec3, l: Vec3, eye: Vec3, dark: Color, light: Color) -> Color {
        match self {
            ShaderModel::DiffuseLight => diffuse_light(n, l),
            ShaderModel::DiffuseColors => diffuse_colors(n, l, dark, light),
            ShaderModel::DiffuseSpecular => {
                diffuse_with_specular(n, l, eye, dark, light, DEFAULT_KS)
            }
            ShaderModel::DiffuseSpecularBorder => {
                diffuse_specular_border(n, l, eye, dark, light, DEFAULT_KS, DEFAULT_THICKNESS)
            }
        }
    }
}

/// Linear remap of `x` from `[edge0, edge1]` onto `[0, 1]`, clamped.
pub fn window(x: f64, edge0: f64, edge1: f64) -> f64 {
    Interval::UNIT.clamp((x - edge0) / (edge1 - edge0))
}

/// Cubic Hermite step over `[edge0, edge1]`.
pub fn smoothstep(x: f64, edge0: f64, edge1: f64) -> f64 {
    let s = window(x, edge0, edge1);
    -2.0 * s * s * s + 3.0 * s * s
}

/// Mirror `l` about `n`: `-l + 2 (n . l) n`.
pub fn reflect(l: Vec3, n: Vec3) -> Vec3 {
    -l + 2.0 * n.dot(l) * n
}

/// Lambert coefficient `max(0, n . l)`, always in `[0, 1]` for unit inputs.
pub fn diffuse_coefficient(n: Vec3, l: Vec3) -> f64 {
    n.dot(l).max(0.0)
}

/// Grayscale intensity `max(0, n . l)` replicated on every channel.
pub fn diffuse_light(n: Vec3, l: Vec3) -> Color {
    Color::splat(diffuse_coefficient(n, l))
}

/// Lambert blend `light * t + dark * (1 - t)`.
pub fn diffuse_colors(n: Vec3, l: Vec3, dark: Color, light: Color) -> Color {
    let t = diffuse_coefficient(n, l);
    light * t + dark * (1.0 - t)
}

/// Diffuse blend pushed toward [`COLOR_FOR_LIGHT`] by a smoothstepped
/// reflection term scaled by `ks`.
pub fn diffuse_with_specular(
    n: Vec3,
    l: Vec3,
    eye: Vec3,
    dark: Color,
    light: Color,
    ks: f64,
) -> Color {
    let color = diffuse_colors(n, l, dark, light);
    let s = eye.dot(reflect(l, n)).max(0.0);
    let s = smoothstep(s, SPECULAR_STEP_MIN, SPECULAR_STEP_MAX);
    color * (1.0 - s * ks) + COLOR_FOR_LIGHT * (s * ks)
}

/// Specular shading blended toward [`COLOR_FOR_BORDER`] near silhouettes.
///
/// The border weight `max(0, 1 - eye . n)` is windowed linearly to
/// `[thickness, 1]`.
pub fn diffuse_specular_border(
    n: Vec3,
    l: Vec3,
    eye: Vec3,
    dark: Color,
    light: Color,
    ks: f64,
    thickness: f64,
) -> Color {
    let b = (1.0 - eye.dot(n)).max(0.0);
    let b = window(b, thickness, 1.0);
    let color = diffuse_with_specular(n, l, eye, dark, light, ks);
    color * (1.0 - b) + COLOR_FOR_BORDER * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::normalize;

    const DARK: Color = Color::new(0.0, 0.0, 15.0);
    const LIGHT: Color = Color::new(0.0, 0.0, 240.0);

    fn between(c: Color, lo: Color, hi: Color) -> bool {
        (0..3).all(|i| c[i] >= lo[i].min(hi[i]) - 1e-9 && c[i] <= lo[i].max(hi[i]) + 1e-9)
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.5, 0.73, 1.0), 0.0);
        assert_eq!(smoothstep(1.2, 0.73, 1.0), 1.0);
        assert!((smoothstep(0.865, 0.73, 1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_about_normal() {
        let l = normalize(Vec3::new(1.0, 1.0, 0.0));
        let r = reflect(l, Vec3::Y);
        assert!((r - normalize(Vec3::new(-1.0, 1.0, 0.0))).length() < 1e-12);
    }

    #[test]
    fn test_diffuse_coefficient_bounded() {
        let dirs = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            normalize(Vec3::new(1.0, 2.0, -3.0)),
            normalize(Vec3::new(-0.3, 0.1, 0.9)),
        ];
        for n in dirs {
            for l in dirs {
                let t = diffuse_coefficient(n, l);
                assert!((0.0..=1.0 + 1e-12).contains(&t), "t={t}");
            }
        }
    }

    #[test]
    fn test_diffuse_colors_between_dark_and_light() {
        let n = Vec3::Y;
        for l in [
            Vec3::Y,
            -Vec3::Y,
            normalize(Vec3::new(1.0, 1.0, 0.0)),
            normalize(Vec3::new(0.2, 0.05, 1.0)),
        ] {
            let c = diffuse_colors(n, l, DARK, LIGHT);
            assert!(between(c, DARK, LIGHT), "{c:?}");
        }
        assert_eq!(diffuse_colors(n, Vec3::Y, DARK, LIGHT), LIGHT);
        assert_eq!(diffuse_colors(n, -Vec3::Y, DARK, LIGHT), DARK);
    }

    #[test]
    fn test_diffuse_light_is_gray_intensity() {
        let c = diffuse_light(Vec3::Y, normalize(Vec3::new(0.0, 1.0, 1.0)));
        assert!((c.x - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
    }

    #[test]
    fn test_specular_highlight_at_mirror_direction() {
        let n = Vec3::Y;
        let l = Vec3::Y;
        let c = diffuse_with_specular(n, l, Vec3::Y, DARK, LIGHT, DEFAULT_KS);
        let expected = LIGHT * (1.0 - DEFAULT_KS) + COLOR_FOR_LIGHT * DEFAULT_KS;
        assert!((c - expected).length() < 1e-9);
    }

    #[test]
    fn test_specular_absent_off_mirror() {
        let n = Vec3::Y;
        let l = normalize(Vec3::new(1.0, 1.0, 0.0));
        let eye = normalize(Vec3::new(1.0, 1.0, 0.0));
        let c = diffuse_with_specular(n, l, eye, DARK, LIGHT, DEFAULT_KS);
        assert_eq!(c, diffuse_colors(n, l, DARK, LIGHT));
    }

    #[test]
    fn test_border_at_silhouette() {
        let n = Vec3::Y;
        let l = Vec3::Y;
        let grazing_eye = Vec3::X;
        let c = diffuse_specular_border(n, l, grazing_eye, DARK, LIGHT, DEFAULT_KS, DEFAULT_THICKNESS);
        assert!((c - COLOR_FOR_BORDER).length() < 1e-9);

        let facing = diffuse_specular_border(n, l, Vec3::Y, DARK, LIGHT, DEFAULT_KS, DEFAULT_THICKNESS);
        let specular = diffuse_with_specular(n, l, Vec3::Y, DARK, LIGHT, DEFAULT_KS);
        assert!((facing - specular).length() < 1e-9);
    }

    #[test]
    fn test_shade_dispatch() {
        let n = Vec3::Y;
        let l = normalize(Vec3::new(0.0, 1.0, 1.0));
        let eye = Vec3::Y;
        assert_eq!(ShaderModel::DiffuseLight.shade(n, l, eye, DARK, LIGHT), diffuse_light(n, l));
        assert_eq!(
            ShaderModel::DiffuseColors.shade(n, l, eye, DARK, LIGHT),
            diffuse_colors(n, l, DARK, LIGHT)
        );
        assert_eq!(
            ShaderModel::DiffuseSpecular.shade(n, l, eye, DARK, LIGHT),
            diffuse_with_specular(n, l, eye, DARK, LIGHT, DEFAULT_KS)
        );
        assert_eq!(
            ShaderModel::DiffuseSpecularBorder.shade(n, l, eye, DARK, LIGHT),
            diffuse_specular_border(n, l, eye, DARK, LIGHT, DEFAULT_KS, DEFAULT_THICKNESS)
        );
    }

    #[test]
    fn test_shader_tags_parse() {
        let model: ShaderModel = ron::from_str("diffuse_with_specular").unwrap();
        assert_eq!(model, ShaderModel::DiffuseSpecular);
        assert!(ron::from_str::<ShaderModel>("phong").is_err());
    }
}
