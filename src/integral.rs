//! Summed-area tables over 8-bit grayscale images.

use crate::foundation::core::Dimensions;
use crate::foundation::error::{BlurError, BlurResult};
use crate::grid::{Grid, PixelBuffer};

/// Inclusive prefix sums of a grayscale image.
///
/// `table[y][x]` holds the sum of every source sample at `(x', y')` with
/// `x' <= x` and `y' <= y`. The table has the same extent as its source and is
/// immutable once built; a changed source needs a fresh table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegralTable {
    sums: Grid<u64>,
}

impl IntegralTable {
    /// Build from a raw row-major `width x height` byte slice.
    #[tracing::instrument(skip(src), fields(len = src.len()))]
    pub fn build(src: &[u8], width: u32, height: u32) -> BlurResult<Self> {
        let dims = Dimensions::new(width, height)?;
        if src.len() != dims.pixel_count() {
            return Err(BlurError::buffer_length(dims.pixel_count(), src.len()));
        }
        Ok(Self::build_unchecked(src, dims))
    }

    /// Build from an owned pixel buffer; its extent is already validated.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self::build_unchecked(buffer.as_slice(), buffer.dimensions())
    }

    fn build_unchecked(src: &[u8], dims: Dimensions) -> Self {
        let w = dims.width as usize;
        let mut sums = vec![0u64; dims.pixel_count()];

        let mut running = 0u64;
        for (cell, &px) in sums[..w].iter_mut().zip(&src[..w]) {
            running += u64::from(px);
            *cell = running;
        }

        for y in 1..dims.height as usize {
            let (above, rest) = sums.split_at_mut(y * w);
            let above = &above[(y - 1) * w..];
            let row = &mut rest[..w];
            let src_row = &src[y * w..(y + 1) * w];

            running = 0;
            for ((cell, &up), &px) in row.iter_mut().zip(above).zip(src_row) {
                running += u64::from(px);
                *cell = up + running;
            }
        }

        tracing::debug!(
            width = dims.width,
            height = dims.height,
            total = sums[sums.len() - 1],
            "integral table built"
        );
        Self {
            sums: Grid::from_parts(dims, sums),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.sums.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.sums.width()
    }

    pub fn height(&self) -> u32 {
        self.sums.height()
    }

    /// Prefix sum at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u64 {
        self.sums.get(x, y)
    }

    /// Sum of the whole source image.
    pub fn total(&self) -> u64 {
        let s = self.sums.as_slice();
        s[s.len() - 1]
    }

    pub fn as_slice(&self) -> &[u64] {
        self.sums.as_slice()
    }
}
