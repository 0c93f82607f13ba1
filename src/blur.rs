use crate::foundation::error::BlurResult;
use crate::grid::{BlurredBuffer, PixelBuffer};
use crate::integral::IntegralTable;
use crate::region::{Window, region_sum};

/// Box blur of a raw row-major grayscale slice.
///
/// Builds the summed-area table, runs [`blur_with_table`], and returns the
/// blurred samples in a fresh allocation.
pub fn box_blur_gray8(src: &[u8], width: u32, height: u32, radius: u32) -> BlurResult<Vec<u8>> {
    let table = IntegralTable::build(src, width, height)?;
    Ok(blur_with_table(&table, radius).into_raw())
}

/// Box blur of an owned pixel buffer.
pub fn box_blur(buffer: &PixelBuffer, radius: u32) -> BlurredBuffer {
    let table = IntegralTable::from_buffer(buffer);
    blur_with_table(&table, radius)
}

/// Average every `(2 * radius + 1)` square window, reading sums from `table`.
///
/// Near the edges the window shrinks to the part inside the image rather
/// than being padded, and the average is divided by the shrunken area. The
/// quotient truncates.
#[tracing::instrument(skip(table), fields(width = table.width(), height = table.height()))]
pub fn blur_with_table(table: &IntegralTable, radius: u32) -> BlurredBuffer {
    let dims = table.dimensions();
    let (w, h) = (dims.width as usize, dims.height as usize);
    let mut out = vec![0u8; dims.pixel_count()];

    for (y, row) in out.chunks_exact_mut(w).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let window = Window::centered(x, y, radius);
            let sum = region_sum(table, window);
            let area = covered_area(window, w, h);
            *px = (sum / area) as u8;
        }
    }

    tracing::debug!(radius, "box blur pass done");
    BlurredBuffer::from_parts(dims, out)
}

// Kept separate from `Window::clamp_to`: this clamp only sizes the divisor.
fn covered_area(window: Window, width: usize, height: usize) -> u64 {
    let x1 = window.x1.max(0);
    let y1 = window.y1.max(0);
    let x2 = window.x2.min(width as i64 - 1);
    let y2 = window.y2.min(height as i64 - 1);
    ((x2 - x1 + 1) * (y2 - y1 + 1)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::BlurError;

    fn brute_blur(src: &[u8], w: usize, h: usize, r: usize) -> Vec<u8> {
        let mut out = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let (x1, x2) = (x.saturating_sub(r), (x + r).min(w - 1));
                let (y1, y2) = (y.saturating_sub(r), (y + r).min(h - 1));
                let mut acc = 0u64;
                for yy in y1..=y2 {
                    for xx in x1..=x2 {
                        acc += u64::from(src[yy * w + xx]);
                    }
                }
                let area = ((x2 - x1 + 1) * (y2 - y1 + 1)) as u64;
                out[y * w + x] = (acc / area) as u8;
            }
        }
        out
    }

    #[test]
    fn blur_radius_0_is_identity() {
        let src: Vec<u8> = (0..20u8).map(|v| v * 13).collect();
        let out = box_blur_gray8(&src, 5, 4, 0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_constant_image_is_identity() {
        let (w, h) = (7u32, 5u32);
        let src = vec![93u8; (w * h) as usize];
        for radius in [1, 2, 3, 10, 1000] {
            let out = box_blur_gray8(&src, w, h, radius).unwrap();
            assert_eq!(out, src, "radius {radius}");
        }
    }

    #[test]
    fn single_pixel_image_is_fixed_point() {
        for radius in [0, 1, 5, u32::MAX] {
            assert_eq!(box_blur_gray8(&[77], 1, 1, radius).unwrap(), vec![77]);
        }
    }

    #[test]
    fn edge_windows_shrink_instead_of_padding() {
        // Corner (0,0) at radius 1 averages the 2x2 block only.
        #[rustfmt::skip]
        let src = [
            10, 20, 90,
            30, 40, 90,
            90, 90, 90,
        ];
        let out = box_blur_gray8(&src, 3, 3, 1).unwrap();
        assert_eq!(u32::from(out[0]), (10 + 20 + 30 + 40) / 4);
        assert_eq!(u32::from(out[4]), (10 + 20 + 30 + 40 + 90 * 5) / 9);
    }

    #[test]
    fn quotient_truncates() {
        // 1 + 2 over a 2x1 window is 1.5, stored as 1.
        let out = box_blur_gray8(&[1, 2], 2, 1, 1).unwrap();
        assert_eq!(out, vec![1, 1]);
    }

    #[test]
    fn huge_radius_is_not_flat() {
        #[rustfmt::skip]
        let src = [
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 255,
        ];
        let out = box_blur_gray8(&src, 4, 3, 2).unwrap();
        assert_eq!(out, brute_blur(&src, 4, 3, 2));
        assert_ne!(out[0], out[11]);

        let global = box_blur_gray8(&src, 4, 3, 100).unwrap();
        assert!(global.iter().all(|&v| v == 255 / 12));
    }

    #[test]
    fn matches_brute_force_on_gradient() {
        let (w, h) = (9usize, 7usize);
        let src: Vec<u8> = (0..w * h).map(|i| ((i * 53) % 251) as u8).collect();
        for r in 0..5 {
            let out = box_blur_gray8(&src, w as u32, h as u32, r as u32).unwrap();
            assert_eq!(out, brute_blur(&src, w, h, r), "radius {r}");
        }
    }

    #[test]
    fn owned_buffer_path_matches_slice_path() {
        let buf = PixelBuffer::from_fn(6, 4, |x, y| (x * 40 + y * 3) as u8).unwrap();
        let a = box_blur(&buf, 2);
        let b = box_blur_gray8(buf.as_slice(), 6, 4, 2).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.dimensions(), buf.dimensions());
    }

    #[test]
    fn invalid_dimensions_abort_the_pass() {
        assert!(matches!(
            box_blur_gray8(&[], 3, 0, 1),
            Err(BlurError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn covered_area_clamps_each_side() {
        assert_eq!(covered_area(Window::centered(0, 0, 1), 5, 5), 4);
        assert_eq!(covered_area(Window::centered(2, 2, 1), 5, 5), 9);
        assert_eq!(covered_area(Window::centered(4, 2, 1), 5, 5), 6);
        assert_eq!(covered_area(Window::centered(0, 0, 50), 5, 3), 15);
    }
}
