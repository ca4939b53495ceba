/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Float;

use exr::prelude::*;

// Write the accumulated linear radiance (pre-tonemap) as an OpenEXR image.
pub fn write_exr_to_file(radiance: &[(Float, Float, Float)],
                         width: usize,
                         height: usize,
                         file_path: &str) {
    log::info!("Starting writing linear radiance to OpenEXR: {}.", file_path);

    let write_result = write_rgb_file(file_path, width, height, |x, y| {
        let (r, g, b) = radiance[y * width + x];
        (r, g, b)
    });
    match write_result {
        Ok(()) => println!("EXR written to: {}.", file_path),
        Err(e) => println!("EXR written error: {}.", e.to_string())
    }
}
