//! Fixed-size vector helpers shared by every stage of the tracer.
//!
//! All geometry and colors are three-component `f64` vectors. Double precision
//! is required by the sky dome, which mixes planetary distances (~10^6 m) with
//! Rayleigh coefficients (~10^-11).

use glam::DVec3;

/// Point or direction in world space.
pub type Vec3 = DVec3;

/// RGB color. Scene colors use the byte scale `[0, 255]` per channel.
pub type Color = DVec3;

/// Largest value of a color channel.
pub const MAX_COLOR_VALUE: f64 = 255.0;

/// Normalize `v` to unit length.
///
/// A zero-length vector is returned unchanged instead of producing NaNs.
pub fn normalize(v: Vec3) -> Vec3 {
    let norm = v.length();
    if norm == 0.0 {
        return v;
    }
    v / norm
}

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    (a - b).length()
}

/// Convert degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees / 360.0) * 2.0 * std::f64::consts::PI
}

/// Component-wise `exp(-v)`, used for Beer-Lambert transmittance.
pub fn exp_neg(v: Vec3) -> Vec3 {
    Vec3::new((-v.x).exp(), (-v.y).exp(), (-v.z).exp())
}
