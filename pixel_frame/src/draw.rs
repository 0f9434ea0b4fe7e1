//! Clipped drawing primitives on [`Frame`].

use crate::color::Bgr;
use crate::frame::Frame;

impl Frame {
    /// Solid disc of `radius` pixels centred on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: isize, cy: isize, radius: usize, color: Bgr) {
        let r = radius as isize;
        let r2 = r * r;
        for dy in -r..=r {
            let y = cy + dy;
            if y < 0 || y >= self.height() as isize { continue; }
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, y, color);
                }
            }
        }
    }

    /// Bresenham line.  `thickness` > 1 stamps a disc at every step.
    pub fn draw_line(
        &mut self,
        from: (isize, isize),
        to:   (isize, isize),
        color: Bgr,
        thickness: usize,
    ) {
        let (mut x, mut y) = from;
        let dx =  (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let pen = thickness / 2;

        loop {
            if pen == 0 {
                self.set_pixel(x, y, color);
            } else {
                self.fill_circle(x, y, pen, color);
            }
            if x == to.0 && y == to.1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Rectangle outline `thickness` pixels wide, drawn inside
    /// `(x, y, w, h)`.
    pub fn draw_border(&mut self, x: isize, y: isize, w: usize, h: usize, thickness: usize, color: Bgr) {
        let (w, h) = (w as isize, h as isize);
        let t = (thickness as isize).min(w).min(h);
        for row in y..y + h {
            for col in x..x + w {
                let inside = col >= x + t && col < x + w - t
                          && row >= y + t && row < y + h - t;
                if !inside {
                    self.set_pixel(col, row, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_radius_one_is_a_plus() {
        let mut f = Frame::new(5, 5);
        f.fill_circle(2, 2, 1, Bgr::WHITE);
        let lit: Vec<(usize, usize)> = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| f.pixel(x, y) == Some(Bgr::WHITE))
            .collect();
        assert_eq!(lit, vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
    }

    #[test]
    fn circle_partly_off_canvas_is_clipped() {
        let mut f = Frame::new(4, 4);
        f.fill_circle(4, 4, 2, Bgr::WHITE);
        assert_eq!(f.pixel(3, 3), Some(Bgr::WHITE));
        assert_eq!(f.pixel(0, 0), Some(Bgr::BLACK));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut f = Frame::new(10, 10);
        f.draw_line((1, 1), (8, 5), Bgr::GREEN, 1);
        assert_eq!(f.pixel(1, 1), Some(Bgr::GREEN));
        assert_eq!(f.pixel(8, 5), Some(Bgr::GREEN));
    }

    #[test]
    fn thick_line_is_wider_than_one_pixel() {
        let mut f = Frame::new(10, 10);
        f.draw_line((0, 5), (9, 5), Bgr::GREEN, 2);
        assert_eq!(f.pixel(4, 4), Some(Bgr::GREEN));
        assert_eq!(f.pixel(4, 6), Some(Bgr::GREEN));
        assert_eq!(f.pixel(4, 8), Some(Bgr::BLACK));
    }

    #[test]
    fn border_leaves_interior_untouched() {
        let mut f = Frame::new(6, 6);
        f.draw_border(0, 0, 6, 6, 2, Bgr::WHITE);
        assert_eq!(f.pixel(0, 0), Some(Bgr::WHITE));
        assert_eq!(f.pixel(1, 3), Some(Bgr::WHITE));
        assert_eq!(f.pixel(5, 5), Some(Bgr::WHITE));
        assert_eq!(f.pixel(2, 2), Some(Bgr::BLACK));
        assert_eq!(f.pixel(3, 3), Some(Bgr::BLACK));
    }
}
