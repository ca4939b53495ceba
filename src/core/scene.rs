// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray;

#[derive(Clone, Debug)]
pub struct Material {
    pub albedo: Vector3f,
    pub emission_color: Vector3f,
    pub emission_strength: Float,
    pub shininess: Float,
}

impl Default for Material {
    // Bright magenta, so a sphere whose material index was never set still
    // shows up on screen instead of rendering black.
    fn default() -> Self {
        Self {
            albedo: Vector3f::new(1.0, 0.0, 1.0),
            emission_color: Vector3f::new(1.0, 1.0, 1.0),
            emission_strength: 0.0,
            shininess: 0.0,
        }
    }
}

impl Material {
    pub fn new(albedo: Vector3f) -> Self {
        Self { albedo, ..Self::default() }
    }

    pub fn with_emission(albedo: Vector3f, emission_color: Vector3f, emission_strength: Float) -> Self {
        Self { albedo, emission_color, emission_strength, shininess: 0.0 }
    }
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Vector3f,
    pub radius: Float,
    pub material_index: usize,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float, material_index: usize) -> Self {
        Self { center, radius, material_index }
    }
}

#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub direction: Vector3f,
    pub color: Vector3f,
    pub intensity: Float,
}

impl DirectionalLight {
    pub fn new(direction: Vector3f, color: Vector3f, intensity: Float) -> Self {
        Self { direction, color, intensity }
    }
}

#[derive(Clone, Debug)]
pub struct PointLight {
    pub position: Vector3f,
    pub color: Vector3f,
    pub intensity: Float,
}

impl PointLight {
    pub fn new(position: Vector3f, color: Vector3f, intensity: Float) -> Self {
        Self { position, color, intensity }
    }
}

/// Implicit light source for rays that leave the scene entirely.
#[derive(Clone, Debug)]
pub struct SkyLight {
    pub color: Vector3f,
    pub strength: Float,
}

impl Default for SkyLight {
    fn default() -> Self {
        Self {
            color: Vector3f::new(0.6, 0.7, 0.9),
            strength: 1.0,
        }
    }
}

/// Closest forward intersection of a ray with the sphere collection. Misses
/// are represented by `Option::None` at the query site.
pub struct HitInfo {
    pub p: Vector3f,
    pub n: Vector3f,
    pub t: Float,
    pub sphere_index: usize,
}

pub struct Scene {
    pub sky_light: SkyLight,
    pub directional_lights: Vec<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
    pub materials: Vec<Material>,
    pub spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            sky_light: SkyLight::default(),
            directional_lights: Vec::new(),
            point_lights: Vec::new(),
            // Index 0 is the magenta fallback.
            materials: vec![Material::default()],
            spheres: Vec::new(),
        }
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Material lookup with fallback to index 0 for out-of-range indices.
    pub fn material(&self, index: usize) -> &Material {
        self.materials.get(index).unwrap_or(&self.materials[0])
    }

    /// Closest hit with t >= 0 over all spheres, scanned linearly. Each
    /// sphere is intersected by solving the quadratic in its local frame:
    /// t^2 (D.D) + 2t (O.D) + (O.O - r^2) = 0, O = origin - center.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<HitInfo> {
        let mut closest_t = Float::MAX;
        let mut closest_index: Option<usize> = None;

        for (index, sphere) in self.spheres.iter().enumerate() {
            let origin = ray.origin() - sphere.center;

            let a = ray.dir().norm_squared();
            let b = 2.0 * origin.dot(&ray.dir());
            let c = origin.norm_squared() - sphere.radius * sphere.radius;

            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }

            // Near root only; the far root would be a hit on the inside of
            // the sphere behind a nearer surface.
            let t0 = (-b - discriminant.sqrt()) / (2.0 * a);
            if t0 >= 0.0 && t0 < closest_t {
                closest_t = t0;
                closest_index = Some(index);
            }
        }

        closest_index.map(|index| {
            let sphere = &self.spheres[index];
            let p = ray.at(closest_t);
            HitInfo {
                p,
                n: (p - sphere.center).normalize(),
                t: closest_t,
                sphere_index: index,
            }
        })
    }

    /// Any-hit variant, without hit point or normal computation.
    pub fn ray_intersection_t(&self, ray: &Ray) -> bool {
        for sphere in &self.spheres {
            let origin = ray.origin() - sphere.center;

            let a = ray.dir().norm_squared();
            let b = 2.0 * origin.dot(&ray.dir());
            let c = origin.norm_squared() - sphere.radius * sphere.radius;

            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }

            if (-b - discriminant.sqrt()) / (2.0 * a) >= 0.0 {
                return true;
            }
        }

        false
    }
}

/* Tests for Scene */
