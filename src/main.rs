// Copyright @yucwang 2026

use meringue::core::integrator::Integrator;
use meringue::core::scene_loader::{load_scene_with_settings, IntegratorKind};
use meringue::integrators::direct::DirectIntegrator;
use meringue::integrators::path::PathIntegrator;
use meringue::io::{exr_utils, png_utils};
use meringue::math::constants::{Float, Vector3f};
use meringue::renderers::progressive::ProgressiveRenderer;
use meringue::renderers::renderer::{PixelFormat, Renderer};
use meringue::sensors::pinhole::PinholeCamera;

use indicatif::{ProgressBar, ProgressStyle};
use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <scene.xml> <output.png> [--frames N] [--bounces N] [--no-accumulate] [--exr PATH]",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let mut frames_override: Option<u32> = None;
    let mut bounces_override: Option<u32> = None;
    let mut accumulate = true;
    let mut exr_path: Option<String> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                frames_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--bounces" => {
                i += 1;
                bounces_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--no-accumulate" => {
                accumulate = false;
            }
            "--exr" => {
                i += 1;
                exr_path = args.get(i).cloned();
            }
            _ => {}
        }
        i += 1;
    }

    let load_result = load_scene_with_settings(input_path).expect("failed to load scene");

    let scene = load_result.scene;
    let mut settings = load_result.settings;
    if let Some(bounces) = bounces_override {
        settings.bounce_limit = bounces;
    }
    if !accumulate {
        settings.accumulate = false;
    }
    let frames = frames_override.unwrap_or(load_result.frames).max(1);

    let camera = load_result.camera.unwrap_or_else(|| {
        log::warn!("scene has no camera element, using the default view");
        PinholeCamera::new(
            Vector3f::new(0.0, 0.0, 3.0),
            Vector3f::zeros(),
            Vector3f::new(0.0, 1.0, 0.0),
            (45.0 as Float).to_radians(),
            640,
            480,
        )
    });

    let integrator: Box<dyn Integrator> = match load_result.integrator {
        IntegratorKind::Path => Box::new(PathIntegrator::new(settings.bounce_limit)),
        IntegratorKind::Direct => Box::new(DirectIntegrator),
    };

    let width = camera.width();
    let height = camera.height();
    let format = PixelFormat::Rgb;
    let mut renderer = ProgressiveRenderer::new(integrator, settings, format, width, height);
    let mut pixels = vec![0u8; width * height * format.components()];

    log::info!("Rendering {} frames at {}x{}.", frames, width, height);
    let progress = ProgressBar::new(frames as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    for _ in 0..frames {
        renderer.render_frame(&scene, &camera, &mut pixels);
        progress.inc(1);
    }
    progress.finish_and_clear();

    png_utils::write_png_to_file(&pixels, width, height, format, output_path);
    if let Some(path) = exr_path {
        exr_utils::write_exr_to_file(&renderer.radiance_mean(), width, height, &path);
    }
}
