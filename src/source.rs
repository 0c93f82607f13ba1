//! Reduce decoded, possibly multi-channel images to one intensity channel.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::foundation::core::Dimensions;
use crate::foundation::error::{BlurError, BlurResult};
use crate::grid::PixelBuffer;

/// Which intensity to keep from each source pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Luminance as computed by `image` (Rec. 709 weights).
    #[default]
    Luma,
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    fn rgba_index(self) -> Option<usize> {
        match self {
            Channel::Luma => None,
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Alpha => Some(3),
        }
    }
}

/// Single-channel view of a decoded image.
///
/// Gray sources answer colour selectors with their one intensity channel.
/// Asking for `Alpha` from an image without alpha is an error.
pub fn gray_from_dynamic(img: &DynamicImage, channel: Channel) -> BlurResult<PixelBuffer> {
    let (width, height) = (img.width(), img.height());
    let data = match channel.rgba_index() {
        None => img.to_luma8().into_raw(),
        Some(3) if !img.color().has_alpha() => {
            return Err(BlurError::config(format!(
                "alpha channel requested but image is {:?}",
                img.color()
            )));
        }
        Some(c) => img.to_rgba8().pixels().map(|p| p.0[c]).collect(),
    };
    PixelBuffer::from_raw(width, height, data)
}

/// Single-channel view of a raw interleaved buffer with 1 to 4 channels
/// (gray, gray+alpha, RGB, RGBA).
pub fn gray_from_interleaved(
    bytes: &[u8],
    width: u32,
    height: u32,
    channels: u8,
    channel: Channel,
) -> BlurResult<PixelBuffer> {
    let dims = Dimensions::new(width, height)?;
    if !(1..=4).contains(&channels) {
        return Err(BlurError::config(format!(
            "unsupported channel count {channels} (expected 1..=4)"
        )));
    }
    let expected = dims.pixel_count() * channels as usize;
    if bytes.len() != expected {
        return Err(BlurError::buffer_length(expected, bytes.len()));
    }

    let raw = bytes.to_vec();
    let img = match channels {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
    }
    .ok_or_else(|| BlurError::buffer_length(expected, bytes.len()))?;

    gray_from_dynamic(&img, channel)
}
