//! # pixel_frame
//!
//! A tightly packed BGR raster ([`Frame`], stored in an `image::RgbImage`)
//! and the software drawing primitives used by the hand-particle pipeline.
//!
//! Pixel order follows the camera convention: three bytes per pixel,
//! blue first.  Drawing is always clipped to the frame, so callers may pass
//! coordinates that fall partly or wholly outside it.
//!
//! | Primitive | Used for |
//! |---|---|
//! | [`Frame::fill_circle`] | particles |
//! | [`Frame::draw_line`] | fingertip debug rays |
//! | [`Frame::draw_border`] | picture-in-picture frame |
//! | [`Frame::flip_horizontal`] | selfie-view mirroring |
//! | [`Frame::resize_nearest`] + [`Frame::blit`] | picture-in-picture |

pub mod color;
pub mod frame;
mod draw;

pub use color::Bgr;
pub use frame::{Frame, FrameError};
