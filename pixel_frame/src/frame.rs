//! The [`Frame`] raster.
//!
//! Pixels live in an [`image::RgbImage`] whose three channels hold blue,
//! green and red in that order.  Nothing here decodes or encodes files, so
//! the channel labels of the `image` crate are never interpreted.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::color::Bgr;

/// Bytes per pixel of a packed BGR frame.
pub const CHANNELS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("buffer holds {actual} bytes but a {width}x{height} BGR frame needs {expected}")]
    SizeMismatch {
        width:    usize,
        height:   usize,
        expected: usize,
        actual:   usize,
    },
}

fn to_px(c: Bgr) -> Rgb<u8> { Rgb([c.b, c.g, c.r]) }
fn from_px(p: &Rgb<u8>) -> Bgr { Bgr::from(p.0) }

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// A row-major BGR image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    img: RgbImage,
}

impl Frame {
    /// A black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Frame { img: RgbImage::new(width as u32, height as u32) }
    }

    /// A frame uniformly filled with `color`.
    pub fn filled(width: usize, height: usize, color: Bgr) -> Self {
        Frame { img: RgbImage::from_pixel(width as u32, height as u32, to_px(color)) }
    }

    /// Wrap an existing packed BGR buffer.
    pub fn from_bgr_bytes(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = width * height * CHANNELS;
        let actual = data.len();
        if actual != expected {
            return Err(FrameError::SizeMismatch { width, height, expected, actual });
        }
        RgbImage::from_raw(width as u32, height as u32, data)
            .map(|img| Frame { img })
            .ok_or(FrameError::SizeMismatch { width, height, expected, actual })
    }

    pub fn width(&self)  -> usize { self.img.width() as usize }
    pub fn height(&self) -> usize { self.img.height() as usize }
    pub fn as_bytes(&self) -> &[u8] { self.img.as_raw() }

    pub fn fill(&mut self, color: Bgr) {
        let px = to_px(color);
        self.img.pixels_mut().for_each(|p| *p = px);
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Bgr> {
        if x >= self.width() || y >= self.height() { return None; }
        self.img.get_pixel_checked(x as u32, y as u32).map(from_px)
    }

    /// Write one pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: isize, y: isize, color: Bgr) {
        if x < 0 || y < 0 { return; }
        if x as usize >= self.width() || y as usize >= self.height() { return; }
        self.img.put_pixel(x as u32, y as u32, to_px(color));
    }

    /// Mirror image around the vertical axis.
    pub fn flip_horizontal(&self) -> Frame {
        Frame { img: imageops::flip_horizontal(&self.img) }
    }

    /// Nearest-neighbour resample to `width × height`.
    pub fn resize_nearest(&self, width: usize, height: usize) -> Frame {
        if width == 0 || height == 0 || self.img.width() == 0 || self.img.height() == 0 {
            return Frame::new(width, height);
        }
        Frame { img: imageops::resize(&self.img, width as u32, height as u32, FilterType::Nearest) }
    }

    /// Copy `src` so its top-left corner lands at `(x, y)`, clipped.
    pub fn blit(&mut self, src: &Frame, x: isize, y: isize) {
        imageops::replace(&mut self.img, &src.img, x as i64, y as i64);
    }

    /// Copy with every pixel scaled by `factor` (see [`Bgr::dimmed`]).
    pub fn dimmed(&self, factor: f32) -> Frame {
        let mut out = self.clone();
        out.img.pixels_mut().for_each(|p| *p = to_px(from_px(p).dimmed(factor)));
        out
    }

    /// Fill `out` with `0x00RRGGBB` words, one per pixel.
    pub fn write_argb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.img.pixels().map(|p| from_px(p).to_argb()));
    }
}
