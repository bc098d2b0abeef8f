//! Canvas layout - fits the board grid onto a screen.
//!
//! The screen loses its outer borders and the safety net on both sides; what
//! remains is shared by the squares and the border lines between and around
//! them. Each axis yields its own square size; the smaller one guides and the
//! other axis is recomputed from it so squares stay square.

/// Outer border widths, in screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Borders {
    pub const fn uniform(width: i32) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasLayout {
    pub total_columns: i32,
    pub total_rows: i32,
    pub borders: Borders,
    /// Extra margin kept free on every side
    pub safety_net: i32,
    /// Width of the line drawn between and around squares
    pub square_border: i32,
}

/// Result of [`CanvasLayout::calculate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub square_size: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl CanvasLayout {
    pub fn new(total_columns: u16, total_rows: u16) -> Self {
        Self {
            total_columns: total_columns as i32,
            total_rows: total_rows as i32,
            ..Self::default()
        }
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_safety_net(mut self, width: i32) -> Self {
        self.safety_net = width;
        self
    }

    pub fn with_square_border(mut self, width: i32) -> Self {
        self.square_border = width;
        self
    }

    /// Largest square size that fits `screen_width x screen_height`.
    ///
    /// A non-positive screen or an empty grid gives all zeros.
    pub fn calculate(&self, screen_width: i32, screen_height: i32) -> Dimensions {
        if screen_width <= 0 || screen_height <= 0 || self.total_columns <= 0 || self.total_rows <= 0 {
            return Dimensions::default();
        }

        let lines_w = self.square_border * (self.total_columns + 1);
        let lines_h = self.square_border * (self.total_rows + 1);

        let canvas_w = screen_width - self.borders.left - self.borders.right - 2 * self.safety_net;
        let canvas_h = screen_height - self.borders.top - self.borders.bottom - 2 * self.safety_net;

        let per_square_w = (canvas_w - lines_w).div_euclid(self.total_columns);
        let per_square_h = (canvas_h - lines_h).div_euclid(self.total_rows);

        let square_size = per_square_w.min(per_square_h).max(0);

        Dimensions {
            square_size,
            canvas_width: square_size * self.total_columns + lines_w,
            canvas_height: square_size * self.total_rows + lines_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(square_size: i32, canvas_width: i32, canvas_height: i32) -> Dimensions {
        Dimensions {
            square_size,
            canvas_width,
            canvas_height,
        }
    }

    #[test]
    fn zero_screen_is_all_zero() {
        let layout = CanvasLayout::new(10, 20);
        assert_eq!(layout.calculate(0, 0), Dimensions::default());
        assert_eq!(layout.calculate(-5, 100), Dimensions::default());
        assert_eq!(CanvasLayout::new(0, 0).calculate(10, 10), Dimensions::default());
    }

    #[test]
    fn single_square_fills_screen() {
        let layout = CanvasLayout::new(1, 1);
        assert_eq!(layout.calculate(10, 10), dims(10, 10, 10));
    }

    #[test]
    fn borders_net_and_square_lines_shrink_the_square() {
        let layout = CanvasLayout::new(1, 1).with_borders(Borders::uniform(2));
        assert_eq!(layout.calculate(10, 10), dims(6, 6, 6));

        let layout = layout.with_square_border(1);
        assert_eq!(layout.calculate(10, 10), dims(4, 6, 6));

        let layout = layout.with_safety_net(1);
        assert_eq!(layout.calculate(10, 10), dims(2, 4, 4));
    }

    #[test]
    fn width_guides_when_squares_are_narrower() {
        let layout = CanvasLayout::new(3, 2)
            .with_borders(Borders {
                top: 14,
                right: 7,
                bottom: 42,
                left: 7,
            })
            .with_square_border(50);
        assert_eq!(layout.calculate(1000, 2000), dims(262, 986, 674));
    }

    #[test]
    fn height_guides_when_squares_are_shorter() {
        let layout = CanvasLayout::new(10, 20)
            .with_borders(Borders {
                top: 14,
                right: 7,
                bottom: 42,
                left: 7,
            })
            .with_safety_net(14)
            .with_square_border(1);
        assert_eq!(layout.calculate(1023, 994), dims(44, 451, 901));
    }

    #[test]
    fn too_small_screen_gives_zero_squares() {
        let layout = CanvasLayout::new(10, 20).with_borders(Borders::uniform(1));
        assert_eq!(layout.calculate(8, 8).square_size, 0);
    }
}
