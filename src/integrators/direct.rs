// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::PcgRng;
use crate::core::scene::Scene;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray;

/// Intersection-only variant: one primary hit shaded with a Lambert cosine
/// term against the scene's directional and point lights. No secondary rays
/// and no occlusion tests, so it converges in a single frame; useful as a
/// fast preview and as a hand-checkable baseline.
pub struct DirectIntegrator;

impl Integrator for DirectIntegrator {
    fn li(&self, scene: &Scene, ray: &mut Ray, _rng: &mut PcgRng) -> Vector3f {
        let hit = match scene.ray_intersection(ray) {
            Some(hit) => hit,
            None => return scene.sky_light.color * scene.sky_light.strength,
        };

        let material = scene.material(scene.spheres[hit.sphere_index].material_index);
        let mut radiance = material.emission_color * material.emission_strength;

        for light in &scene.directional_lights {
            let dir = light.direction.normalize();
            let cos_term = hit.n.dot(&-dir).max(0.0);
            radiance += (light.color * light.intensity * cos_term).component_mul(&material.albedo);
        }

        for light in &scene.point_lights {
            let to_light = light.position - hit.p;
            let dist_sq = to_light.norm_squared();
            if dist_sq <= 0.0 {
                continue;
            }
            let cos_term = hit.n.dot(&(to_light / dist_sq.sqrt())).max(0.0);
            let falloff = light.intensity / dist_sq;
            radiance += (light.color * falloff * cos_term).component_mul(&material.albedo);
        }

        radiance
    }
}

/* Tests for DirectIntegrator */
