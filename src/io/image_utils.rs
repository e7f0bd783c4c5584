/* Copyright 2020 @TwoCookingMice */

use crate::core::error::{RenderError, Result};
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use exr::prelude::write_rgb_file;
use std::path::Path;

/// Linear to sRGB transfer curve.
pub fn gamma_correct(v: Float) -> Float {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Quantize a linear value to an 8-bit sRGB code, clamping out of range
/// and non-finite input.
pub fn to_srgb8(v: Float) -> u8 {
    let v = if v.is_finite() { v.max(0.0).min(1.0) } else { 0.0 };
    (gamma_correct(v) * 255.0 + 0.5) as u8
}

/// Write `image` next to `file_path`, picking the format from the
/// extension: `.exr` keeps linear floats, `.png` is sRGB encoded.
pub fn write_image(image: &Bitmap, file_path: &Path) -> Result<()> {
    let extension = file_path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => write_exr_to_file(image, file_path),
        Some("png") => write_png_to_file(image, file_path),
        _ => Err(RenderError::ImageWrite(
            format!("unsupported output format for {}, use .exr or .png", file_path.display()))),
    }
}

// Write EXR Image to file
pub fn write_exr_to_file(image: &Bitmap, file_path: &Path) -> Result<()> {
    log::info!("Starting writing openexr images: {}.", file_path.display());

    write_rgb_file(file_path, image.width(), image.height(), |x, y| {
        let rgb = image[(x, y)];
        (rgb.x, rgb.y, rgb.z)
    }).map_err(|e| RenderError::ImageWrite(e.to_string()))?;

    log::info!("EXR written to: {}.", file_path.display());
    Ok(())
}

pub fn write_png_to_file(image: &Bitmap, file_path: &Path) -> Result<()> {
    log::info!("Starting writing png images: {}.", file_path.display());

    let buf: Vec<u8> = image.raw_copy().iter()
        .flat_map(|&(r, g, b)| [to_srgb8(r), to_srgb8(g), to_srgb8(b)].to_vec())
        .collect();
    image::save_buffer_with_format(
        file_path,
        buf.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    ).map_err(|e| RenderError::ImageWrite(e.to_string()))?;

    log::info!("PNG written to: {}.", file_path.display());
    Ok(())
}
