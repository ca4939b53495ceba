// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

// Hable filmic operator constants.
const A: Float = 0.15;
const B: Float = 0.50;
const C: Float = 0.10;
const D: Float = 0.20;
const E: Float = 0.02;
const F: Float = 0.30;

fn filmic(x: Float) -> Float {
    ((x * (A * x + C * B) + D * E) / (x * (A * x + B) + D * F)) - E / F
}

/// Filmic tone map applied per channel to `color * exposure`, compressing
/// unbounded radiance into display range.
pub fn tone_map(color: Vector3f, exposure: Float) -> Vector3f {
    let c = color * exposure;
    Vector3f::new(filmic(c.x), filmic(c.y), filmic(c.z))
}

/// Linear-to-perceptual encoding. Non-positive channels pass through, so
/// fractional powers never produce NaN.
pub fn gamma_correct(color: Vector3f, gamma: Float) -> Vector3f {
    let inv_gamma = 1.0 / gamma;
    let encode = |v: Float| if v > 0.0 { v.powf(inv_gamma) } else { v };
    Vector3f::new(encode(color.x), encode(color.y), encode(color.z))
}

/// Clamps to [0, 1] and denormalizes to 8-bit channels.
pub fn quantize(color: Vector3f) -> [u8; 3] {
    let to_byte = |v: Float| (v.max(0.0).min(1.0) * 255.0).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/* Tests for the post-processing pipeline */
