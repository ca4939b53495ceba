// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::PcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{Vector3f, EPSILON};
use crate::math::ray::Ray;

/// Single-sample path tracer. One call follows one stochastic light path up
/// to the bounce limit; variance reduction comes from accumulating calls
/// across frames, not from multiple samples here.
pub struct PathIntegrator {
    pub bounce_limit: u32,
}

impl PathIntegrator {
    pub fn new(bounce_limit: u32) -> Self {
        Self { bounce_limit }
    }
}

impl Integrator for PathIntegrator {
    fn li(&self, scene: &Scene, ray: &mut Ray, rng: &mut PcgRng) -> Vector3f {
        let mut incoming = Vector3f::zeros();
        let mut contribution = Vector3f::new(1.0, 1.0, 1.0);

        for _ in 0..self.bounce_limit {
            let hit = match scene.ray_intersection(ray) {
                Some(hit) => hit,
                None => {
                    // The sky is sampled once, on escape.
                    let sky = scene.sky_light.color * scene.sky_light.strength;
                    incoming += sky.component_mul(&contribution);
                    break;
                }
            };

            let material = scene.material(scene.spheres[hit.sphere_index].material_index);
            let emitted = material.emission_color * material.emission_strength;
            incoming += emitted.component_mul(&contribution);
            contribution = contribution.component_mul(&material.albedo);

            // Nudge off the surface so the continuation ray cannot re-hit it
            // through floating-point error.
            ray.reseat(hit.p + hit.n * EPSILON, hit.n + rng.unit_vector());
        }

        incoming
    }
}

/* Tests for PathIntegrator */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Material, Sphere};

    fn trace(scene: &Scene, bounce_limit: u32, seed: u32) -> Vector3f {
        let integrator = PathIntegrator::new(bounce_limit);
        let mut ray = Ray::new(Vector3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut rng = PcgRng::new(seed);
        integrator.li(scene, &mut ray, &mut rng)
    }

    #[test]
    fn test_miss_with_dark_sky_is_black() {
        let mut scene = Scene::new();
        scene.sky_light.strength = 0.0;

        let radiance = trace(&scene, 4, 1);
        assert_eq!(radiance, Vector3f::zeros());
    }

    #[test]
    fn test_miss_returns_sky_radiance() {
        let mut scene = Scene::new();
        scene.sky_light.color = Vector3f::new(0.2, 0.4, 0.8);
        scene.sky_light.strength = 2.0;

        let radiance = trace(&scene, 4, 1);
        assert!((radiance - Vector3f::new(0.4, 0.8, 1.6)).norm() < 1e-6);
    }

    #[test]
    fn test_energy_is_never_amplified() {
        let mut scene = Scene::new();
        scene.sky_light.color = Vector3f::new(1.0, 1.0, 1.0);
        scene.sky_light.strength = 1.0;
        let material = scene.add_material(Material::new(Vector3f::new(0.9, 0.6, 0.3)));
        scene.add_sphere(Sphere::new(Vector3f::zeros(), 0.5, material));
        scene.add_sphere(Sphere::new(Vector3f::new(0.0, -100.5, 0.0), 100.0, material));

        // With no emissive surfaces, every path is bounded by the sky term.
        for seed in 0..512 {
            let radiance = trace(&scene, 8, seed);
            assert!(radiance.x <= 1.0 + 1e-5);
            assert!(radiance.y <= 1.0 + 1e-5);
            assert!(radiance.z <= 1.0 + 1e-5);
            assert!(radiance.x >= 0.0);
            assert!(radiance.y >= 0.0);
            assert!(radiance.z >= 0.0);
        }
    }

    #[test]
    fn test_emissive_hit_contributes_before_attenuation() {
        let mut scene = Scene::new();
        scene.sky_light.strength = 0.0;
        let material = scene.add_material(Material::with_emission(
            Vector3f::zeros(),
            Vector3f::new(1.0, 0.5, 0.25),
            3.0,
        ));
        scene.add_sphere(Sphere::new(Vector3f::zeros(), 0.5, material));

        // First-hit emission is weighted by the initial throughput of 1, and
        // a zero albedo kills everything after the first bounce.
        let radiance = trace(&scene, 4, 9);
        assert!((radiance - Vector3f::new(3.0, 1.5, 0.75)).norm() < 1e-5);
    }

    #[test]
    fn test_same_seed_reproduces_estimate() {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::new(Vector3f::new(0.7, 0.7, 0.7)));
        scene.add_sphere(Sphere::new(Vector3f::zeros(), 0.5, material));

        let a = trace(&scene, 6, 31337);
        let b = trace(&scene, 6, 31337);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_bounce_limit_collects_nothing() {
        let scene = Scene::new();
        let radiance = trace(&scene, 0, 5);
        assert_eq!(radiance, Vector3f::zeros());
    }
}
