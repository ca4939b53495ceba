// Copyright @yucwang 2026

use crate::renderers::renderer::PixelFormat;

// Write the post-processed 8-bit pixel buffer as a PNG.
pub fn write_png_to_file(pixels: &[u8],
                         width: usize,
                         height: usize,
                         format: PixelFormat,
                         file_path: &str) {
    log::info!("Starting writing display buffer to PNG: {}.", file_path);

    let color_type = match format {
        PixelFormat::Rgb => image::ColorType::Rgb8,
        PixelFormat::Rgba => image::ColorType::Rgba8,
    };
    let write_result =
        image::save_buffer(file_path, pixels, width as u32, height as u32, color_type);
    match write_result {
        Ok(()) => println!("PNG written to: {}.", file_path),
        Err(e) => println!("PNG written error: {}.", e.to_string())
    }
}

/* Tests for the PNG writer */
