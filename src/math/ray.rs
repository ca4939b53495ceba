// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

pub struct Ray {
    origin: Vector3f,
    dir: Vector3f,
}

impl Ray {
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self { origin: o, dir: d.normalize() }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Moves the ray to a new origin and direction, renormalizing the
    /// direction. Integrators call this to continue a path in place; a ray is
    /// never shared across pixels.
    pub fn reseat(&mut self, o: Vector3f, d: Vector3f) {
        self.origin = o;
        self.dir = d.normalize();
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Ray;
    use super::Vector3f;

    #[test]
    fn test_ray_at() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(2.0, 0.0, 0.0);
        let ray = Ray::new(o, d);
        assert_eq!(o, ray.origin());
        assert!((ray.dir().norm() - 1.0).abs() < 1e-6);

        let p = ray.at(3.0);
        assert!((p.x - 3.0).abs() < 1e-6);
        assert!((p.y - 0.0).abs() < 1e-6);
        assert!((p.z - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_reseat_renormalizes() {
        let mut ray = Ray::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0));
        ray.reseat(Vector3f::new(1.0, 2.0, 3.0), Vector3f::new(0.0, 5.0, 0.0));

        assert_eq!(ray.origin(), Vector3f::new(1.0, 2.0, 3.0));
        assert!((ray.dir().norm() - 1.0).abs() < 1e-6);
        assert!((ray.dir().y - 1.0).abs() < 1e-6);
    }
}
