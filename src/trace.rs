//! Scene raytrace orchestration: nearest-hit selection, direct shading and
//! hard-shadow compositing into a byte RGB pixel.

use image::Rgb;
use log::trace;

use crate::hittable::{Hittable, SceneObject};
use crate::interval::Interval;
use crate::light::Light;
use crate::math::{normalize, Color, Vec3, MAX_COLOR_VALUE};
use crate::ray::Ray;

/// Unlit luminance preset, scaled by the material color.
pub const DARK_VALUE: f64 = 15.0 / MAX_COLOR_VALUE;
/// Lit luminance preset, scaled by the material color.
pub const LIGHT_VALUE: f64 = 240.0 / MAX_COLOR_VALUE;

/// Black pixel.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Nearest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the object in the scene list.
    pub index: usize,
    /// Ray parameter of the hit.
    pub t: f64,
}

/// Clamp each channel to `[0, 255]` and truncate to bytes.
pub fn to_rgb(color: Color) -> Rgb<u8> {
    let channel = |v: f64| Interval::COLOR.clamp(v) as u8;
    Rgb([channel(color.x), channel(color.y), channel(color.z)])
}

/// The object with the smallest strictly-positive `t`; the first one wins ties.
pub fn nearest_hit(ray: &Ray, objects: &[SceneObject]) -> Option<Hit> {
    let mut nearest: Option<Hit> = None;
    for (index, object) in objects.iter().enumerate() {
        let t = object.intersect(ray);
        let t_min = nearest.map_or(f64::INFINITY, |hit| hit.t);
        if Interval::new(0.0, t_min).surrounds(t) {
            nearest = Some(Hit { index, t });
        }
    }
    nearest
}

/// Direct shading of `object` at `ph`, averaged over `lights`.
///
/// An undefined normal at `ph` makes the whole pixel black. The normal does
/// not depend on the light, so every light would fail the same way.
pub fn compute_color(ph: Vec3, eye: Vec3, object: &SceneObject, lights: &[Light]) -> Rgb<u8> {
    if lights.is_empty() {
        return BLACK;
    }
    let Some(nh) = object.normal_at(ph) else {
        trace!("undefined surface normal at {ph:?}, shading as black");
        return BLACK;
    };

    let dark = object.material.diffuse * DARK_VALUE;
    let light_color = object.material.diffuse * LIGHT_VALUE;
    let mut final_color = Color::ZERO;
    for light in lights {
        let l = light.direction_from(ph);
        final_color += object.shader.shade(nh, l, eye, dark, light_color);
    }
    to_rgb(final_color / lights.len() as f64)
}

/// Binary occlusion for one light: black when any occluder lies strictly
/// between `ph` and the light, full white otherwise.
pub fn hard_shadow<'a>(
    ph: Vec3,
    occluders: impl IntoIterator<Item = &'a SceneObject>,
    l: Vec3,
    dist_l: f64,
) -> Color {
    let shadow_ray = Ray::new(ph, l);
    let between = Interval::new(0.0, dist_l);
    let occluded = occluders
        .into_iter()
        .any(|object| between.surrounds(object.intersect(&shadow_ray)));
    if occluded {
        Color::ZERO
    } else {
        Color::splat(MAX_COLOR_VALUE)
    }
}

/// Shadow attenuation at `ph`, averaged over `lights`.
pub fn compute_shadow<'a, I>(ph: Vec3, occluders: I, lights: &[Light]) -> Rgb<u8>
where
    I: IntoIterator<Item = &'a SceneObject> + Clone,
{
    if lights.is_empty() {
        return BLACK;
    }
    let mut final_shadow = Color::ZERO;
    for light in lights {
        let l = light.direction_from(ph);
        let dist_l = light.distance_from(ph);
        final_shadow += hard_shadow(ph, occluders.clone(), l, dist_l);
    }
    to_rgb(final_shadow / lights.len() as f64)
}

/// Multiply a direct color by a shadow factor, rounding to the nearest byte.
pub fn composite(color: Rgb<u8>, shadow: Rgb<u8>) -> Rgb<u8> {
    let channel = |c: u8, s: u8| {
        let value = (c as f64 * (s as f64 / MAX_COLOR_VALUE)).round();
        Interval::COLOR.clamp(value) as u8
    };
    Rgb([
        channel(color.0[0], shadow.0[0]),
        channel(color.0[1], shadow.0[1]),
        channel(color.0[2], shadow.0[2]),
    ])
}

/// Shade a known hit: direct color times the shadow cast by every other object.
pub fn shade_hit(
    ray: &Ray,
    hit: Hit,
    camera_pos: Vec3,
    objects: &[SceneObject],
    lights: &[Light],
) -> Rgb<u8> {
    let Some(object) = objects.get(hit.index) else {
        return BLACK;
    };
    let ph = ray.at(hit.t);
    let eye = normalize(camera_pos - ph);
    let color = compute_color(ph, eye, object, lights);

    let occluders = objects
        .iter()
        .enumerate()
        .filter(move |(index, _)| *index != hit.index)
        .map(|(_, object)| object);
    let shadow = compute_shadow(ph, occluders, lights);
    composite(color, shadow)
}

/// Trace `ray` to the closest object and return its shaded, shadowed color.
///
/// Returns black when nothing is hit; sky substitution is up to the caller.
pub fn raytrace(ray: &Ray, camera_pos: Vec3, objects: &[SceneObject], lights: &[Light]) -> Rgb<u8> {
    match nearest_hit(ray, objects) {
        Some(hit) => shade_hit(ray, hit, camera_pos, objects, lights),
        None => BLACK,
    }
}
