// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::PcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray;
use crate::post::tonemap;
use crate::sensors::pinhole::PinholeCamera;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::{PixelFormat, RenderSettings, Renderer};

const BLOCK_SIZE: usize = 64;

/// Seed for the random stream of one pixel in one frame. Reproducible across
/// runs, distinct across neighbouring pixels and consecutive frames.
pub fn pixel_seed(pixel_index: usize, frame: u32) -> u32 {
    (pixel_index as u32).wrapping_add(frame.wrapping_mul(0x9E37_79B9))
}

/// Accumulating frame renderer. Each `render_frame` call adds one integrator
/// sample per pixel to a running sum; the displayed value is the running mean
/// over all frames since the last reset, post-processed into 8-bit color.
pub struct ProgressiveRenderer {
    integrator: Box<dyn Integrator>,
    settings: RenderSettings,
    format: PixelFormat,
    width: usize,
    height: usize,
    accumulation: Vec<Vector3f>,
    // Names the frame about to be rendered; never 0.
    frame_counter: u32,
}

impl ProgressiveRenderer {
    pub fn new(integrator: Box<dyn Integrator>,
               settings: RenderSettings,
               format: PixelFormat,
               width: usize,
               height: usize) -> Self {
        Self {
            integrator,
            settings,
            format,
            width,
            height,
            accumulation: vec![Vector3f::zeros(); width * height],
            frame_counter: 1,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Post-processing fields may be flipped freely between frames; the
    /// accumulate toggle must go through `set_accumulate` so the sample
    /// sequence restarts cleanly.
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn set_accumulate(&mut self, accumulate: bool) {
        if accumulate && !self.settings.accumulate {
            self.frame_counter = 1;
        }
        self.settings.accumulate = accumulate;
    }

    /// Drops all accumulated samples; the next frame starts the sequence
    /// over at frame 1.
    pub fn reset(&mut self) {
        self.frame_counter = 1;
    }

    /// Must be called before rendering at a new resolution. Reallocates the
    /// accumulation buffer and restarts the sample sequence.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.accumulation = vec![Vector3f::zeros(); width * height];
        self.frame_counter = 1;
    }

    /// Mean linear radiance currently accumulated, suitable for HDR export.
    /// The counter names the frame about to be rendered, so the number of
    /// samples already summed is `frame_counter - 1` in accumulate mode and
    /// one otherwise.
    pub fn radiance_mean(&self) -> Vec<(Float, Float, Float)> {
        let samples = self.frame_counter.saturating_sub(1).max(1) as Float;
        self.accumulation
            .iter()
            .map(|c| (c.x / samples, c.y / samples, c.z / samples))
            .collect()
    }
}

impl Renderer for ProgressiveRenderer {
    fn render_frame(&mut self, scene: &Scene, camera: &PinholeCamera, pixels: &mut [u8]) {
        let comps = self.format.components();
        assert_eq!(
            (camera.width(), camera.height()),
            (self.width, self.height),
            "camera resolution does not match the renderer; call resize first"
        );
        assert_eq!(
            pixels.len(),
            self.width * self.height * comps,
            "pixel buffer length does not match width * height * components"
        );

        if self.frame_counter == 1 {
            for slot in self.accumulation.iter_mut() {
                *slot = Vector3f::zeros();
            }
        }

        let frame = self.frame_counter;
        let width = self.width;
        let height = self.height;
        let settings = &self.settings;
        let integrator: &dyn Integrator = self.integrator.as_ref();
        let accumulation = &mut self.accumulation;

        let blocks_x = (width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let blocks_y = (height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let total_blocks = blocks_x * blocks_y;

        let next_block = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let (tx, rx) = mpsc::channel::<(usize, usize, usize, usize, Vec<Vector3f>)>();

        // Workers only ever read the scene, camera and integrator; every
        // sample travels back over the channel and the accumulation and
        // pixel buffers are touched by this thread alone.
        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = Arc::clone(&next_block);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * BLOCK_SIZE;
                        let y0 = (block_index / blocks_x) * BLOCK_SIZE;
                        let x1 = (x0 + BLOCK_SIZE).min(width);
                        let y1 = (y0 + BLOCK_SIZE).min(height);

                        let mut block = vec![Vector3f::zeros(); (x1 - x0) * (y1 - y0)];
                        for y in y0..y1 {
                            for x in x0..x1 {
                                let pixel_index = y * width + x;
                                let mut rng = PcgRng::new(pixel_seed(pixel_index, frame));
                                let mut ray = Ray::new(camera.origin(), camera.ray_dir(pixel_index));
                                block[(x - x0) + (x1 - x0) * (y - y0)] =
                                    integrator.li(scene, &mut ray, &mut rng);
                            }
                        }
                        if tx.send((x0, y0, x1, y1, block)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_blocks {
                if let Ok((x0, y0, x1, y1, block)) = rx.recv() {
                    for y in y0..y1 {
                        for x in x0..x1 {
                            let pixel_index = y * width + x;
                            accumulation[pixel_index] += block[(x - x0) + (x1 - x0) * (y - y0)];

                            let mut color = accumulation[pixel_index] / (frame as Float);
                            if settings.tone_mapping {
                                color = tonemap::tone_map(color, settings.exposure);
                            }
                            if settings.gamma_correction {
                                color = tonemap::gamma_correct(color, settings.gamma);
                            }
                            let rgb = tonemap::quantize(color);

                            let offset = comps * pixel_index;
                            pixels[offset] = rgb[0];
                            pixels[offset + 1] = rgb[1];
                            pixels[offset + 2] = rgb[2];
                            if comps == 4 {
                                pixels[offset + 3] = 0xFF;
                            }
                        }
                    }
                }
            }
        });

        log::debug!("rendered frame {} at {}x{}", frame, width, height);

        if self.settings.accumulate {
            self.frame_counter += 1;
        } else {
            self.frame_counter = 1;
        }
    }
}

/* Tests for ProgressiveRenderer */
