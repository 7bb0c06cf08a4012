//! Preview generation: decode an image and letterbox it onto a fixed-size canvas.

use crate::config::{CANVAS_COLOR, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use crate::error::{Result, SortError};
use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use std::path::Path;

/// Target canvas dimensions for previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    /// Zero dimensions are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self::new(PREVIEW_WIDTH, PREVIEW_HEIGHT)
    }
}

/// RGBA8 pixels of a rendered preview, always exactly the requested size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Anything that can turn an image path into a preview.
///
/// The cache talks to this trait so decoding can be swapped out in tests.
pub trait ThumbnailSource: Send + Sync {
    fn render(&self, path: &Path, size: PreviewSize) -> Result<Preview>;
}

/// Decodes with the `image` crate and letterboxes onto a neutral canvas.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThumbnailGenerator;

impl ThumbnailSource for ThumbnailGenerator {
    fn render(&self, path: &Path, size: PreviewSize) -> Result<Preview> {
        let decoded = decode_rgba(path)?;
        Ok(letterbox(&decoded, size))
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> SortError {
    SortError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Decodes a file into RGBA8. Sources without alpha become fully opaque.
fn decode_rgba(path: &Path) -> Result<RgbaImage> {
    let img = ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))?
        .decode()
        .map_err(|e| decode_error(path, e))?;
    Ok(img.to_rgba8())
}

/// Fitted dimensions of a `src_w` x `src_h` image inside `size`, aspect preserved.
fn fit_within(src_w: u32, src_h: u32, size: PreviewSize) -> (u32, u32) {
    let scale = (size.width as f64 / src_w as f64).min(size.height as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, size.width);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, size.height);
    (w, h)
}

/// Scales `src` to fit `size` and centers it on a canvas of exactly `size`.
pub fn letterbox(src: &RgbaImage, size: PreviewSize) -> Preview {
    let mut canvas = RgbaImage::from_pixel(size.width, size.height, Rgba(CANVAS_COLOR));

    if src.width() > 0 && src.height() > 0 {
        let (w, h) = fit_within(src.width(), src.height(), size);
        let resized = imageops::resize(src, w, h, FilterType::Lanczos3);
        let x = i64::from((size.width - w) / 2);
        let y = i64::from((size.height - h) / 2);
        imageops::overlay(&mut canvas, &resized, x, y);
    }

    Preview {
        width: canvas.width(),
        height: canvas.height(),
        data: canvas.into_raw(),
    }
}
