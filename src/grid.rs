use crate::foundation::core::Dimensions;
use crate::foundation::error::{BlurError, BlurResult};

/// Dense row-major 2D grid with a fixed extent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    dims: Dimensions,
    data: Vec<T>,
}

/// Single-channel 8-bit intensity samples.
pub type PixelBuffer = Grid<u8>;

/// Output of a blur pass; never aliases its source.
pub type BlurredBuffer = Grid<u8>;

impl<T> Grid<T> {
    /// Wrap `data` as a `width x height` grid.
    ///
    /// Fails with `InvalidDimensions` for a zero side and `BufferLength` when
    /// `data` does not hold exactly `width * height` samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<T>) -> BlurResult<Self> {
        let dims = Dimensions::new(width, height)?;
        if data.len() != dims.pixel_count() {
            return Err(BlurError::buffer_length(dims.pixel_count(), data.len()));
        }
        Ok(Self { dims, data })
    }

    /// Build a grid by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> BlurResult<Self> {
        let dims = Dimensions::new(width, height)?;
        let mut data = Vec::with_capacity(dims.pixel_count());
        for y in 0..height as usize {
            for x in 0..width as usize {
                data.push(f(x, y));
            }
        }
        Ok(Self { dims, data })
    }

    pub(crate) fn from_parts(dims: Dimensions, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), dims.pixel_count());
        Self { dims, data }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Row `y` as a contiguous slice of `width` samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let w = self.dims.width as usize;
        &self.data[y * w..(y + 1) * w]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.dims.width as usize)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy> Grid<T> {
    /// Sample at `(x, y)`; panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.dims.index(x, y)]
    }
}
