//! Render configuration with defaults and RON persistence.
//!
//! Every section is optional in the file; missing values fall back to the
//! built-in reference render (200x200, 4x4 jitter, `output.jpg` at quality 95).

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::render::{RenderSettings, Sampling, SkyBackdrop, SkyOutput, DEFAULT_SKY_EXPOSURE};
use crate::scene::Scene;
use crate::sky::{self, SkyDome};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output image settings.
    pub image: ImageConfig,
    /// Sampling settings.
    pub tracing: TracingConfig,
    /// Sky backdrop settings.
    pub sky: SkyConfig,
    /// Scene to render.
    pub scene: Scene,
    /// Base seed; drawn at random when absent.
    pub seed: Option<u64>,
}

/// Output image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Destination file, `.png` or `.jpg`/`.jpeg`.
    pub output: PathBuf,
    /// JPEG quality (1..=100).
    pub quality: u8,
}

/// Sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TracingConfig {
    /// Vertical jitter strata per pixel.
    pub v_samples: u32,
    /// Horizontal jitter strata per pixel.
    pub h_samples: u32,
    /// Jittered anti-aliasing; one centered ray per pixel when false.
    pub anti_aliasing: bool,
}

/// Sky backdrop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Fill missed rays with the sky instead of black.
    pub enabled: bool,
    /// Sky integral used for the backdrop.
    pub output: SkyOutput,
    /// Direction toward the sun.
    pub sun_direction: Vec3,
    /// Multiplier of the `1 / λ⁴` scattering coefficients.
    pub scattering_scale: f64,
    /// Density falloff exponent.
    pub density_falloff: f64,
    /// View ray samples per query.
    pub view_samples: usize,
    /// Samples per optical depth estimate.
    pub optical_depth_samples: usize,
    /// Linear multiplier applied before conversion to bytes.
    pub exposure: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            output: PathBuf::from("output.jpg"),
            quality: 95,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            v_samples: 4,
            h_samples: 4,
            anti_aliasing: true,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output: SkyOutput::default(),
            sun_direction: sky::default_sun_direction(),
            scattering_scale: sky::SCATTERING_SCALE,
            density_falloff: sky::DENSITY_FALLOFF,
            view_samples: sky::IN_SCATTER_SAMPLES,
            optical_depth_samples: sky::OPTICAL_DEPTH_SAMPLES,
            exposure: DEFAULT_SKY_EXPOSURE,
        }
    }
}

impl SkyConfig {
    /// Earth-sized dome at the origin with this section's parameters.
    pub fn dome(&self) -> SkyDome {
        SkyDome::new(
            sky::default_center(),
            sky::EARTH_RADIUS,
            self.sun_direction,
            sky::DEFAULT_ATMOSPHERE_HEIGHT,
            sky::DEFAULT_AVG_DENSITY_HEIGHT,
        )
        .with_scattering_scale(self.scattering_scale)
        .with_density_falloff(self.density_falloff)
        .with_optical_depth_samples(self.optical_depth_samples)
    }

    /// Backdrop for the driver, `None` when disabled.
    pub fn backdrop(&self) -> Option<SkyBackdrop> {
        self.enabled.then(|| SkyBackdrop {
            dome: self.dome(),
            output: self.output,
            samples: self.view_samples,
            exposure: self.exposure,
        })
    }
}

impl Config {
    /// Parse a RON document.
    pub fn from_ron(contents: &str) -> Result<Self> {
        ron::from_str(contents).map_err(Error::ConfigParse)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&contents)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(Error::ConfigSerialize)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Apply CLI overrides to a loaded config.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref output) = args.output {
            self.image.output = output.clone();
        }
        if let Some(width) = args.width {
            self.image.width = width;
        }
        if let Some(height) = args.height {
            self.image.height = height;
        }
        if let Some(quality) = args.quality {
            self.image.quality = quality;
        }
        if let Some(v) = args.v_samples {
            self.tracing.v_samples = v;
        }
        if let Some(h) = args.h_samples {
            self.tracing.h_samples = h;
        }
        if args.debug {
            self.tracing.anti_aliasing = false;
        }
        if args.sky {
            self.sky.enabled = true;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
    }

    /// Driver settings for a resolved base seed.
    pub fn render_settings(&self, seed: u64) -> RenderSettings {
        let sampling = if self.tracing.anti_aliasing {
            Sampling::Jittered {
                v_samples: self.tracing.v_samples,
                h_samples: self.tracing.h_samples,
            }
        } else {
            Sampling::Centered
        };
        RenderSettings {
            width: self.image.width,
            height: self.image.height,
            sampling,
            seed,
            sky: self.sky.backdrop(),
            progress: true,
        }
    }
}
