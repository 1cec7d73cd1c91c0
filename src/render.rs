//! Image sampling driver.
//!
//! Casts one or more primary rays per pixel through the scene camera, shades
//! them with [`crate::trace`] and averages the samples. Rays that leave the
//! scene are black unless a [`SkyBackdrop`] is configured. Every pixel draws
//! from its own ChaCha20 stream, so an image depends only on its seed.

use std::time::Instant;

use image::{Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::logger::humanize_time;
use crate::math::{Color, MAX_COLOR_VALUE};
use crate::random::{jitter, pixel_rng};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::sky::{SkyDome, IN_SCATTER_SAMPLES};
use crate::trace::{nearest_hit, shade_hit, to_rgb, BLACK};

/// Backdrop exposure that brings Earth-scale in-scattering (about `7e-3`
/// per channel) into the visible byte range.
pub const DEFAULT_SKY_EXPOSURE: f64 = 100.0;

/// Largest accepted `v_samples × h_samples` grid.
pub const MAX_SAMPLES_PER_PIXEL: u32 = 1 << 16;

/// Which sky integral feeds the backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyOutput {
    /// Radius-normalized ambient light, see [`SkyDome::light_at_ray`].
    Ambient,
    /// Phase-weighted sun light, see [`SkyDome::in_scattering`].
    #[default]
    InScattering,
}

/// Sky shown behind the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyBackdrop {
    /// Planet and atmosphere
    pub dome: SkyDome,
    /// Integral used for the color
    pub output: SkyOutput,
    /// View ray samples per query
    pub samples: usize,
    /// Linear multiplier applied before conversion to bytes
    pub exposure: f64,
}

impl Default for SkyBackdrop {
    fn default() -> Self {
        Self {
            dome: SkyDome::default(),
            output: SkyOutput::default(),
            samples: IN_SCATTER_SAMPLES,
            exposure: DEFAULT_SKY_EXPOSURE,
        }
    }
}

impl SkyBackdrop {
    /// Byte color of the sky seen along `ray`.
    pub fn color<R: Rng + ?Sized>(&self, ray: &Ray, rng: &mut R) -> Rgb<u8> {
        let light = match self.output {
            SkyOutput::Ambient => self.dome.light_at_ray(ray, self.samples, rng),
            SkyOutput::InScattering => self.dome.in_scattering(ray, self.samples, rng),
        };
        to_rgb(light * self.exposure * MAX_COLOR_VALUE)
    }
}

/// Sub-pixel sample placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// `v_samples × h_samples` strata per pixel, one jittered ray in each
    Jittered {
        /// Vertical strata
        v_samples: u32,
        /// Horizontal strata
        h_samples: u32,
    },
    /// One ray through the pixel center, no anti-aliasing
    Centered,
}

impl Sampling {
    /// Rays cast per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        match *self {
            Sampling::Jittered { v_samples, h_samples } => v_samples.saturating_mul(h_samples),
            Sampling::Centered => 1,
        }
    }

    /// Sub-pixel offsets in `[0, 1)²` for one pixel.
    pub fn offsets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(f64, f64)> {
        match *self {
            Sampling::Centered => vec![(0.5, 0.5)],
            Sampling::Jittered { v_samples, h_samples } => {
                let count = v_samples as usize * h_samples as usize;
                let jitter_x = jitter(rng, count);
                let jitter_y = jitter(rng, count);
                (0..v_samples)
                    .flat_map(|v| (0..h_samples).map(move |h| (v, h)))
                    .enumerate()
                    .map(|(i, (v, h))| {
                        let x = (f64::from(h) + jitter_x[i]) / f64::from(h_samples);
                        let y = (f64::from(v) + jitter_y[i]) / f64::from(v_samples);
                        (x, y)
                    })
                    .collect()
            }
        }
    }
}

/// Everything the driver needs besides the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Sample placement
    pub sampling: Sampling,
    /// Base seed of the per-pixel streams
    pub seed: u64,
    /// Backdrop for rays that miss every object
    pub sky: Option<SkyBackdrop>,
    /// Draw a progress bar
    pub progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            sampling: Sampling::Jittered {
                v_samples: 4,
                h_samples: 4,
            },
            seed: 0,
            sky: None,
            progress: false,
        }
    }
}

impl RenderSettings {
    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSettings(format!(
                "image size must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if let Sampling::Jittered { v_samples, h_samples } = self.sampling {
            if v_samples == 0 || h_samples == 0 {
                return Err(Error::InvalidSettings(format!(
                    "sample grid must be at least 1x1, got {v_samples}x{h_samples}"
                )));
            }
            match v_samples.checked_mul(h_samples) {
                Some(count) if count <= MAX_SAMPLES_PER_PIXEL => {}
                _ => {
                    return Err(Error::InvalidSettings(format!(
                        "sample grid {v_samples}x{h_samples} exceeds {MAX_SAMPLES_PER_PIXEL} samples per pixel"
                    )))
                }
            }
        }
        Ok(())
    }
}

/// Color seen along one primary ray.
pub fn trace_sample<R: Rng + ?Sized>(
    ray: &Ray,
    camera: &Camera,
    scene: &Scene,
    sky: Option<&SkyBackdrop>,
    rng: &mut R,
) -> Rgb<u8> {
    match nearest_hit(ray, &scene.objects) {
        Some(hit) => shade_hit(ray, hit, camera.position, &scene.objects, &scene.lights),
        None => sky.map_or(BLACK, |sky| sky.color(ray, rng)),
    }
}

/// Average of all samples of pixel `(x, y)`, rounded to the nearest byte.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    x: u32,
    y: u32,
) -> Rgb<u8> {
    let mut rng = pixel_rng(settings.seed, x, y);
    let offsets = settings.sampling.offsets(&mut rng);

    let mut sum = Color::ZERO;
    for &(dx, dy) in &offsets {
        let ray = camera.ray_through(
            f64::from(x) + dx,
            f64::from(y) + dy,
            settings.width,
            settings.height,
        );
        let Rgb([r, g, b]) = trace_sample(&ray, camera, scene, settings.sky.as_ref(), &mut rng);
        sum += Color::new(f64::from(r), f64::from(g), f64::from(b));
    }
    to_rgb((sum / offsets.len() as f64).round())
}

fn progress_bar(settings: &RenderSettings) -> ProgressBar {
    if !settings.progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(u64::from(settings.height));
    let style = ProgressStyle::default_bar()
        .template("{bar:40} {pos}/{len} rows ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Render the first camera of `scene`.
pub fn render(scene: &Scene, settings: &RenderSettings) -> Result<RgbImage> {
    settings.validate()?;
    scene.validate()?;
    let camera = scene
        .main_camera()
        .ok_or_else(|| Error::InvalidSettings("scene has no camera".to_string()))?;

    info!(
        "Rendering {}x{} with {} sample(s) per pixel, seed {}",
        settings.width,
        settings.height,
        settings.sampling.samples_per_pixel(),
        settings.seed
    );
    if let Some(sky) = &settings.sky {
        debug!("Sky backdrop: {:?} output, exposure {}", sky.output, sky.exposure);
    }

    let start = Instant::now();
    let pb = progress_bar(settings);
    let mut image = RgbImage::new(settings.width, settings.height);
    for y in 0..settings.height {
        for x in 0..settings.width {
            image.put_pixel(x, y, render_pixel(scene, camera, settings, x, y));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Image generated in {}", humanize_time(start.elapsed().as_secs_f64()));
    Ok(image)
}
