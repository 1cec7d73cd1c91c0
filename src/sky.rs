//! Single-scattering sky dome.
//!
//! The planet is a [`Sphere`] and the top of the atmosphere a [`HollowSphere`]
//! around the same center. A view ray is marched through the shell with
//! jittered stratified samples; each sample is lit by a sun ray unless that ray
//! hits the planet first. Attenuation along the sun and view paths uses a
//! Monte-Carlo optical depth over an empirical density profile, and scattering
//! follows the Rayleigh `1 / λ⁴` law over three sampled wavelengths.
//!
//! Two outputs are provided:
//! - [`SkyDome::light_at_ray`]: radius-normalized ambient color clamped to
//!   `[0, 1]`, also exposed as [`SkyDome::sky_color`];
//! - [`SkyDome::in_scattering`]: phase-weighted, unnormalized light scaled
//!   by [`SUN_COLOR`].

use std::f64::consts::PI;

use rand::Rng;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::math::{distance, exp_neg, normalize, Color, Vec3};
use crate::random::stratified;
use crate::ray::Ray;
use crate::sphere::{HollowSphere, Sphere};

/// Planet radius in meters.
pub const EARTH_RADIUS: f64 = 6378.0 * 1000.0;
/// Height of the atmosphere shell above the surface.
pub const DEFAULT_ATMOSPHERE_HEIGHT: f64 = EARTH_RADIUS * 0.025;
/// Altitude of average density.
pub const DEFAULT_AVG_DENSITY_HEIGHT: f64 = 0.25 * DEFAULT_ATMOSPHERE_HEIGHT;
/// View ray samples per sky query.
pub const IN_SCATTER_SAMPLES: usize = 10;
/// Samples per optical depth estimate.
pub const OPTICAL_DEPTH_SAMPLES: usize = 10;
/// Sampled wavelengths in nanometers (red, green, blue).
pub const WAVE_LENGTHS: [f64; 3] = [650.0, 510.0, 445.0];
/// Multiplier applied to `1 / λ⁴`.
pub const SCATTERING_SCALE: f64 = 1.0;
/// Exponent of the density falloff with normalized height.
pub const DENSITY_FALLOFF: f64 = 4.0;
/// Sun radiance used by [`SkyDome::in_scattering`].
pub const SUN_COLOR: Color = Color::new(1289.0, 1395.0, 1234.0);

/// Planet center placing the world origin on the surface.
pub fn default_center() -> Vec3 {
    Vec3::new(0.0, -EARTH_RADIUS, 0.0)
}

/// Low sun ahead of the default camera.
pub fn default_sun_direction() -> Vec3 {
    normalize(Vec3::new(0.0, 0.15, 1.0))
}

/// Rayleigh coefficients `scale / λ⁴` per channel.
pub fn scattering_coefficients(wavelengths: [f64; 3], scale: f64) -> Color {
    let [r, g, b] = wavelengths.map(|lambda| scale / lambda.powi(4));
    Color::new(r, g, b)
}

/// Lit sample along a view ray.
struct ViewSample {
    point: Vec3,
    /// Distance from the view ray origin.
    distance: f64,
    /// Stratum jitter in `[0, 1)`.
    jitter: f64,
    sun_ray: Ray,
    /// Distance from the sample to the top of the atmosphere toward the sun.
    sun_distance: f64,
}

/// Planet and atmosphere used to compute sky light.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyDome {
    center: Vec3,
    radius: f64,
    sun_direction: Vec3,
    atmosphere_height: f64,
    avg_density_height: f64,
    density_falloff: f64,
    scattering: Color,
    sun_color: Color,
    optical_depth_samples: usize,
    planet: Sphere,
    atmosphere: HollowSphere,
}

impl Default for SkyDome {
    fn default() -> Self {
        Self::new(
            default_center(),
            EARTH_RADIUS,
            default_sun_direction(),
            DEFAULT_ATMOSPHERE_HEIGHT,
            DEFAULT_AVG_DENSITY_HEIGHT,
        )
    }
}

impl SkyDome {
    /// Create a sky dome. `sun_direction` is normalized.
    pub fn new(
        center: Vec3,
        radius: f64,
        sun_direction: Vec3,
        atmosphere_height: f64,
        avg_density_height: f64,
    ) -> Self {
        Self {
            center,
            radius,
            sun_direction: normalize(sun_direction),
            atmosphere_height,
            avg_density_height,
            density_falloff: DENSITY_FALLOFF,
            scattering: scattering_coefficients(WAVE_LENGTHS, SCATTERING_SCALE),
            sun_color: SUN_COLOR,
            optical_depth_samples: OPTICAL_DEPTH_SAMPLES,
            planet: Sphere::new(center, radius),
            atmosphere: HollowSphere::new(center, radius + atmosphere_height),
        }
    }

    /// Replace the density falloff exponent.
    pub fn with_density_falloff(mut self, falloff: f64) -> Self {
        self.density_falloff = falloff;
        self
    }

    /// Rescale the Rayleigh coefficients of [`WAVE_LENGTHS`].
    pub fn with_scattering_scale(mut self, scale: f64) -> Self {
        self.scattering = scattering_coefficients(WAVE_LENGTHS, scale);
        self
    }

    /// Replace the sun radiance used by [`SkyDome::in_scattering`].
    pub fn with_sun_color(mut self, sun_color: Color) -> Self {
        self.sun_color = sun_color;
        self
    }

    /// Replace the number of samples per optical depth estimate.
    pub fn with_optical_depth_samples(mut self, samples: usize) -> Self {
        self.optical_depth_samples = samples.max(1);
        self
    }

    /// Planet center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Planet radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit direction toward the sun.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    /// Height of the atmosphere above the surface.
    pub fn atmosphere_height(&self) -> f64 {
        self.atmosphere_height
    }

    /// Altitude of average density. Informational, the density profile is
    /// driven by the falloff exponent.
    pub fn avg_density_height(&self) -> f64 {
        self.avg_density_height
    }

    /// Per-channel scattering coefficients.
    pub fn scattering(&self) -> Color {
        self.scattering
    }

    /// Planet surface as a solid sphere.
    pub fn planet(&self) -> &Sphere {
        &self.planet
    }

    /// Outer atmosphere boundary.
    pub fn atmosphere(&self) -> &HollowSphere {
        &self.atmosphere
    }

    /// Rayleigh phase function `3/4 (1 + (v1 . v2)²)`.
    pub fn phase_function(v1: Vec3, v2: Vec3) -> f64 {
        (3.0 / 4.0) * (1.0 + v1.dot(v2).powi(2))
    }

    /// Normalized height above the surface: 0 at the ground, 1 at the top.
    pub fn normalized_height(&self, p: Vec3) -> f64 {
        (distance(p, self.center) - self.radius) / self.atmosphere_height
    }

    /// Density `exp(-h * falloff) * (1 - h)` at normalized height `h`.
    ///
    /// Reaches exactly zero at the top of the atmosphere.
    pub fn density_at_point(&self, p: Vec3) -> f64 {
        let h = self.normalized_height(p);
        (-h * self.density_falloff).exp() * (1.0 - h)
    }

    /// Jittered Monte-Carlo optical depth from `p` along `direction` over
    /// `distance`. Each sample is weighted by its distance from `p`.
    pub fn optical_depth<R: Rng + ?Sized>(
        &self,
        p: Vec3,
        direction: Vec3,
        distance: f64,
        num_samples: usize,
        rng: &mut R,
    ) -> f64 {
        stratified(rng, num_samples, distance)
            .into_iter()
            .map(|(_, d)| self.density_at_point(p + direction * d) * d)
            .sum()
    }

    /// Light lost along a path: `4π β τ`.
    pub fn out_scattering<R: Rng + ?Sized>(
        &self,
        p: Vec3,
        direction: Vec3,
        distance: f64,
        num_samples: usize,
        rng: &mut R,
    ) -> Color {
        let depth = self.optical_depth(p, direction, distance, num_samples, rng);
        4.0 * PI * self.scattering * depth
    }

    /// Jittered samples along `ray` inside the atmosphere that see the sun,
    /// with the distance to the atmosphere boundary.
    fn lit_view_samples<R: Rng + ?Sized>(
        &self,
        ray: &Ray,
        view_samples: usize,
        rng: &mut R,
    ) -> Option<(f64, Vec<ViewSample>)> {
        let dist_to_atmosphere = self.atmosphere.intersect(ray);
        if dist_to_atmosphere <= 0.0 || view_samples == 0 {
            return None;
        }

        let samples = stratified(rng, view_samples, dist_to_atmosphere)
            .into_iter()
            .filter_map(|(jitter, distance)| {
                let point = ray.at(distance);
                let sun_ray = Ray::new(point, self.sun_direction);
                let t_to_atmosphere = self.atmosphere.intersect(&sun_ray);
                let t_to_planet = self.planet.intersect(&sun_ray);
                if Interval::new(0.0, t_to_atmosphere).surrounds(t_to_planet) {
                    return None;
                }
                Some(ViewSample {
                    point,
                    distance,
                    jitter,
                    sun_ray,
                    sun_distance: t_to_atmosphere,
                })
            })
            .collect();
        Some((dist_to_atmosphere, samples))
    }

    /// Phase-weighted in-scattered light along `ray`, scaled by the sun color.
    ///
    /// Not normalized or clamped.
    pub fn in_scattering<R: Rng + ?Sized>(&self, ray: &Ray, view_samples: usize, rng: &mut R) -> Color {
        let Some((_, samples)) = self.lit_view_samples(ray, view_samples, rng) else {
            return Color::ZERO;
        };
        let n = self.optical_depth_samples;
        let mut transmittance = Color::ZERO;
        for sample in samples {
            let out_sun = self.out_scattering(
                sample.sun_ray.origin,
                sample.sun_ray.direction,
                sample.sun_distance,
                n,
                rng,
            );
            let out_view = self.out_scattering(sample.point, -ray.direction, sample.distance, n, rng);
            let density = self.density_at_point(sample.point);
            let phase = Self::phase_function(sample.sun_ray.direction, -ray.direction);
            transmittance += exp_neg(out_sun + out_view) * (density * sample.distance * phase);
        }
        self.sun_color * self.scattering * transmittance
    }

    /// Ambient sky color along `ray`, normalized by the planet radius and
    /// clamped to `[0, 1]` per channel.
    pub fn light_at_ray<R: Rng + ?Sized>(&self, ray: &Ray, view_samples: usize, rng: &mut R) -> Color {
        let Some((dist_to_atmosphere, samples)) = self.lit_view_samples(ray, view_samples, rng)
        else {
            return Color::ZERO;
        };
        let n = self.optical_depth_samples;
        let stratum = dist_to_atmosphere / view_samples as f64;
        let mut light = Color::ZERO;
        for sample in samples {
            let sun_depth = self.optical_depth(
                sample.sun_ray.origin,
                sample.sun_ray.direction,
                sample.sun_distance,
                n,
                rng,
            );
            let view_depth = self.optical_depth(sample.point, -ray.direction, sample.distance, n, rng);
            let transmittance = exp_neg((sun_depth + view_depth) * self.scattering);
            let segment_size = stratum * sample.jitter;
            light += transmittance * (self.density_at_point(sample.point) * segment_size);
        }
        light *= self.scattering;
        light /= self.radius;
        light.clamp(Color::ZERO, Color::ONE)
    }

    /// Sky color for a ray leaving the scene, see [`SkyDome::light_at_ray`].
    pub fn sky_color<R: Rng + ?Sized>(&self, ray: &Ray, rng: &mut R) -> Color {
        self.light_at_ray(ray, IN_SCATTER_SAMPLES, rng)
    }
}
