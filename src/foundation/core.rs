use crate::foundation::error::{BlurError, BlurResult};

/// Largest pixel count a single image may have.
pub const MAX_PIXELS: u64 = u32::MAX as u64;

/// Largest value a summed-area table cell can reach (every pixel at 255).
pub const MAX_TABLE_SUM: u64 = MAX_PIXELS * u8::MAX as u64;

const _: () = assert!(MAX_PIXELS.checked_mul(u8::MAX as u64).is_some());

/// Validated image extent: both sides positive, pixel count within [`MAX_PIXELS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels, `> 0`.
    pub width: u32,
    /// Height in pixels, `> 0`.
    pub height: u32,
}

impl Dimensions {
    /// Check `width` and `height` once, up front.
    pub fn new(width: u32, height: u32) -> BlurResult<Self> {
        if width == 0 || height == 0 {
            return Err(BlurError::invalid_dimensions(width, height));
        }
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(BlurError::ImageTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels, `width * height`.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major offset of `(x, y)`.
    #[inline]
    pub fn index(self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width as usize && y < self.height as usize);
        y * self.width as usize + x
    }
}
