use crate::foundation::error::BlurResult;
use crate::foundation::rng::Rng64;
use crate::grid::PixelBuffer;

/// Deterministic pseudo-random grayscale image; the same seed always yields
/// the same bytes on every platform.
pub fn seeded_gray(width: u32, height: u32, seed: u64) -> BlurResult<PixelBuffer> {
    let mut rng = Rng64::new(seed);
    PixelBuffer::from_fn(width, height, |_, _| rng.next_u64() as u8)
}
