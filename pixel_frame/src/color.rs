//! BGR colour triple.

/// One pixel, stored in camera byte order (blue, green, red).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const BLACK: Bgr = Bgr::new(0, 0, 0);
    pub const WHITE: Bgr = Bgr::new(255, 255, 255);
    pub const GREEN: Bgr = Bgr::new(0, 255, 0);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Bgr { b, g, r }
    }

    /// Neutral grey with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Bgr::new(level, level, level)
    }

    /// Pack as `0x00RRGGBB`, the layout `minifb` expects.
    pub fn to_argb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Scale every channel by `factor` (clamped to 0.0–1.0).
    pub fn dimmed(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f) as u8;
        Bgr::new(scale(self.b), scale(self.g), scale(self.r))
    }
}

impl From<[u8; 3]> for Bgr {
    fn from(px: [u8; 3]) -> Self {
        Bgr::new(px[0], px[1], px[2])
    }
}
