use std::path::Path;

use anyhow::Context;
use image::DynamicImage;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{BlurError, BlurResult};
use crate::grid::PixelBuffer;

/// A decoded image plus the facts the CLI reports about it.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub image: DynamicImage,
}

impl DecodedImage {
    fn from_dynamic(image: DynamicImage) -> BlurResult<Self> {
        let dims = Dimensions::new(image.width(), image.height())?;
        Ok(Self {
            width: dims.width,
            height: dims.height,
            channels: image.color().channel_count(),
            image,
        })
    }
}

/// Decode any container format the `image` crate understands.
pub fn decode_image(bytes: &[u8]) -> BlurResult<DecodedImage> {
    let image = image::load_from_memory(bytes).context("decode image from memory")?;
    DecodedImage::from_dynamic(image)
}

#[tracing::instrument]
pub fn load_image(path: &Path) -> BlurResult<DecodedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    let decoded = DecodedImage::from_dynamic(image)?;
    tracing::debug!(
        width = decoded.width,
        height = decoded.height,
        channels = decoded.channels,
        "image loaded"
    );
    Ok(decoded)
}

/// Read headerless interleaved 8-bit RGB, `3 * width * height` bytes.
///
/// Trailing bytes beyond the image are ignored; a short file is an error.
#[tracing::instrument]
pub fn load_raw_rgb(path: &Path, width: u32, height: u32) -> BlurResult<DecodedImage> {
    let dims = Dimensions::new(width, height)?;
    let mut bytes =
        std::fs::read(path).with_context(|| format!("read raw image '{}'", path.display()))?;
    let expected = dims.pixel_count() * 3;
    if bytes.len() < expected {
        return Err(BlurError::buffer_length(expected, bytes.len()));
    }
    bytes.truncate(expected);

    let rgb = image::RgbImage::from_raw(width, height, bytes)
        .ok_or_else(|| BlurError::buffer_length(expected, 0))?;
    tracing::debug!(width, height, "raw rgb loaded");
    DecodedImage::from_dynamic(DynamicImage::ImageRgb8(rgb))
}

/// Write a grayscale buffer.
///
/// `.raw` and `.gray` paths get the bare samples; anything else is encoded by
/// `image`, which picks the format from the extension.
pub fn save_gray(path: &Path, buffer: &PixelBuffer) -> BlurResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let raw = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("raw") || e.eq_ignore_ascii_case("gray"));
    if raw {
        std::fs::write(path, buffer.as_slice())
            .with_context(|| format!("write raw '{}'", path.display()))?;
    } else {
        image::save_buffer(
            path,
            buffer.as_slice(),
            buffer.width(),
            buffer.height(),
            image::ColorType::L8,
        )
        .with_context(|| format!("write image '{}'", path.display()))?;
    }
    Ok(())
}
