use crate::integral::IntegralTable;

/// Inclusive query rectangle `(x1, y1)..=(x2, y2)` in image coordinates.
///
/// Corners may lie outside the image; [`region_sum`] clamps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Window {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The `(2 * radius + 1)` square centered on `(x, y)`, unclamped.
    pub fn centered(x: usize, y: usize, radius: u32) -> Self {
        let (x, y, r) = (x as i64, y as i64, i64::from(radius));
        Self {
            x1: x - r,
            y1: y - r,
            x2: x + r,
            y2: y + r,
        }
    }

    /// Clamp each corner independently to `[0, width) x [0, height)`.
    ///
    /// Corners are not reordered: an inverted window stays inverted.
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        Self {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(i64::from(width) - 1),
            y2: self.y2.min(i64::from(height) - 1),
        }
    }
}

/// Sum of source samples inside `window`, clamped to the table's extent.
///
/// Four table lookups regardless of window size:
/// `D - C - B + A` with `D` the bottom-right prefix, `C` the prefix left of
/// the window, `B` the prefix above it, and `A` the diagonal prefix counted
/// twice by `B` and `C`. Windows that are empty or inverted after clamping
/// sum to 0.
pub fn region_sum(table: &IntegralTable, window: Window) -> u64 {
    let Window { x1, y1, x2, y2 } = window.clamp_to(table.width(), table.height());
    if x1 > x2 || y1 > y2 {
        return 0;
    }
    let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize, y2 as usize);

    let d = table.get(x2, y2);
    let c = if x1 > 0 { table.get(x1 - 1, y2) } else { 0 };
    let b = if y1 > 0 { table.get(x2, y1 - 1) } else { 0 };
    let a = if x1 > 0 && y1 > 0 {
        table.get(x1 - 1, y1 - 1)
    } else {
        0
    };

    // `d + a` bounds both subtrahends, so the order keeps every step non-negative.
    d + a - c - b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_12x10() -> IntegralTable {
        #[rustfmt::skip]
        let src = [
        //  0  1  2  3  4  5  6  7  8  9 10 11
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 1
            0, 0, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, // 2
            0, 0, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, // 3
            0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, // 4
            0, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, // 5
            0, 0, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, // 6
            0, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, // 7
            0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, // 8
            0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, // 9
        ];
        IntegralTable::build(&src, 12, 10).unwrap()
    }

    #[test]
    fn interior_rectangles() {
        let t = table_12x10();
        assert_eq!(region_sum(&t, Window::new(0, 2, 1, 5)), 0);
        assert_eq!(region_sum(&t, Window::new(2, 2, 3, 6)), 10);
        assert_eq!(region_sum(&t, Window::new(4, 2, 5, 6)), 2);
        assert_eq!(region_sum(&t, Window::new(5, 8, 8, 9)), 7);
    }

    #[test]
    fn full_image_equals_total() {
        let t = table_12x10();
        assert_eq!(region_sum(&t, Window::new(0, 0, 11, 9)), t.total());
    }

    #[test]
    fn out_of_bounds_corners_are_clamped() {
        let t = table_12x10();
        assert_eq!(region_sum(&t, Window::new(-5, -5, 100, 100)), t.total());
        assert_eq!(
            region_sum(&t, Window::new(-3, 2, 3, 6)),
            region_sum(&t, Window::new(0, 2, 3, 6))
        );
        assert_eq!(
            region_sum(&t, Window::new(7, 7, 20, 20)),
            region_sum(&t, Window::new(7, 7, 11, 9))
        );
    }

    #[test]
    fn single_cell_window_reads_the_pixel() {
        let src = [9u8, 4, 7, 1, 0, 3];
        let t = IntegralTable::build(&src, 3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let w = Window::new(x, y, x, y);
                assert_eq!(region_sum(&t, w), u64::from(src[(y * 3 + x) as usize]));
            }
        }
    }

    #[test]
    fn degenerate_windows_sum_to_zero() {
        let t = table_12x10();
        assert_eq!(region_sum(&t, Window::new(5, 5, 4, 5)), 0);
        assert_eq!(region_sum(&t, Window::new(5, 5, 5, 2)), 0);
        assert_eq!(region_sum(&t, Window::new(-9, -9, -2, -2)), 0);
        assert_eq!(region_sum(&t, Window::new(12, 10, 40, 40)), 0);
    }

    #[test]
    fn centered_window_extends_radius_each_way() {
        assert_eq!(Window::centered(0, 3, 2), Window::new(-2, 1, 2, 5));
        assert_eq!(Window::centered(4, 4, 0), Window::new(4, 4, 4, 4));
    }

    #[test]
    fn clamp_does_not_reorder_corners() {
        let w = Window::new(9, 1, 3, 8).clamp_to(5, 5);
        assert_eq!(w, Window::new(9, 1, 3, 4));
    }
}
