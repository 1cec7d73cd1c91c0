//! SkyTrace ray tracer
//!
//! Casts primary rays against spheres, planes, triangles and tetrahedra,
//! shades hits with toon-style models under hard shadows, and fills the rest
//! of the frame with a single-scattering atmospheric sky when asked to.
//! Outputs PNG and JPEG.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod light;
pub mod logger;
pub mod material;
pub mod math;
pub mod output;
pub mod plane;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod shaders;
pub mod sky;
pub mod sphere;
pub mod trace;
pub mod triangle;

pub use error::{Error, Result};
