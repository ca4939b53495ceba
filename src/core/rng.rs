// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f, PI};

/// Per-pixel random stream: a 32-bit linear congruential advance with a
/// PCG-style output scramble, so streams seeded from consecutive pixel
/// indices do not share low-bit patterns.
pub struct PcgRng {
    state: u32,
}

impl PcgRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(747796405).wrapping_add(2891336453);
        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state).wrapping_mul(277803737);
        (word >> 22) ^ word
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }

    /// Normally-distributed scalar (Box-Muller, mean 0).
    pub fn next_gaussian(&mut self) -> Float {
        let theta = 2.0 * PI * self.next_f32();
        let rho = (-2.0 * self.next_f32().ln()).sqrt();
        rho * theta.cos()
    }

    /// Uniform direction on the unit sphere, built from three independent
    /// gaussians. This is not a cosine-weighted hemisphere sample; the path
    /// integrator combines it with the surface normal instead.
    pub fn unit_vector(&mut self) -> Vector3f {
        let v = Vector3f::new(self.next_gaussian(), self.next_gaussian(), self.next_gaussian());
        v.normalize()
    }
}

/* Tests for PcgRng */
