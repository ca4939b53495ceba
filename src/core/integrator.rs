// Copyright @yucwang 2026

use crate::core::rng::PcgRng;
use crate::core::scene::Scene;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray;

pub trait Integrator: Sync {
    /// Estimated incoming radiance along `ray`, in unbounded linear RGB. The
    /// ray is advanced in place and left wherever the last bounce put it.
    fn li(&self, scene: &Scene, ray: &mut Ray, rng: &mut PcgRng) -> Vector3f;
}
