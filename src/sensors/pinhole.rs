// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Pinhole camera that caches one ray direction per pixel, indexed with
/// `y * width + x`. The cache is rebuilt on resize; render loops only read
/// the eye position and the direction array.
pub struct PinholeCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    width: usize,
    height: usize,
    ray_dirs: Vec<Vector3f>,
}

impl PinholeCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        let mut camera = Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            width,
            height,
            ray_dirs: Vec::new(),
        };
        camera.regenerate_rays();
        camera
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn ray_dir(&self, pixel_index: usize) -> Vector3f {
        self.ray_dirs[pixel_index]
    }

    pub fn ray_dirs(&self) -> &[Vector3f] {
        &self.ray_dirs
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }

        self.width = width;
        self.height = height;
        self.regenerate_rays();
    }

    fn regenerate_rays(&mut self) {
        let aspect = self.width as Float / self.height as Float;

        self.ray_dirs = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let u = (x as Float + 0.5) / self.width as Float;
                let v = (y as Float + 0.5) / self.height as Float;
                let px = (2.0 * u - 1.0) * aspect * self.tan_half_fov_y;
                let py = (1.0 - 2.0 * v) * self.tan_half_fov_y;

                let dir = self.right * px + self.up * py + self.forward;
                self.ray_dirs.push(dir.normalize());
            }
        }
    }
}

/* Tests for PinholeCamera */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_forward() {
        let cam = PinholeCamera::new(
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            1,
            1,
        );

        let dir = cam.ray_dir(0);
        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rays_cover_every_pixel() {
        let cam = PinholeCamera::new(
            Vector3f::new(0.0, 1.0, 5.0),
            Vector3f::zeros(),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_3,
            8,
            4,
        );

        assert_eq!(cam.ray_dirs().len(), 32);
        for dir in cam.ray_dirs() {
            assert!((dir.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_resize_regenerates_cache() {
        let mut cam = PinholeCamera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            2,
            2,
        );
        assert_eq!(cam.ray_dirs().len(), 4);

        cam.resize(4, 2);
        assert_eq!(cam.width(), 4);
        assert_eq!(cam.height(), 2);
        assert_eq!(cam.ray_dirs().len(), 8);
    }

    #[test]
    fn test_upper_left_ray_leans_up_and_left() {
        let cam = PinholeCamera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            3,
            3,
        );

        // Row 0 is the top of the image.
        let dir = cam.ray_dir(0);
        assert!(dir.x < 0.0);
        assert!(dir.y > 0.0);
        assert!(dir.z < 0.0);
    }
}
