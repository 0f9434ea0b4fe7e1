//! Frame sources.
//!
//! The pipeline only ever asks for "the next frame, if any" through
//! [`FrameSource`], so a local camera, a piped decoder and a network
//! transport all look the same to it.

use std::io::{self, ErrorKind, Read};

use pixel_frame::{Bgr, Frame};
use tracing::{info, warn};

/// Anything that yields camera frames in order.  `None` ends the session.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Frame>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Option<Frame> {
        (**self).next_frame()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticCamera
// ════════════════════════════════════════════════════════════════════════════

/// Animated test pattern standing in for a webcam.
///
/// A dim diagonal gradient with a bright band sweeping left to right, so
/// the mirroring and the picture-in-picture are visibly alive.
pub struct SyntheticCamera {
    width:  usize,
    height: usize,
    frame:  u64,
    limit:  Option<u64>,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize) -> Self {
        SyntheticCamera { width, height, frame: 0, limit: None }
    }

    /// End the stream after `frames` frames.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.limit.is_some_and(|n| self.frame >= n) {
            return None;
        }

        let (w, h) = (self.width, self.height);
        let band_x = (self.frame as usize * 8) % w.max(1);
        let mut f = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let shade = ((x + y) * 60 / (w + h).max(1)) as u8;
                let color = if x.abs_diff(band_x) < 12 {
                    Bgr::new(shade + 120, shade + 120, shade + 60)
                } else {
                    Bgr::new(shade + 30, shade + 20, shade + 10)
                };
                f.set_pixel(x as isize, y as isize, color);
            }
        }

        self.frame += 1;
        Some(f)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RawVideoSource
// ════════════════════════════════════════════════════════════════════════════

/// Reads headerless packed `bgr24` frames, for example from
/// `ffmpeg -i input.mp4 -f rawvideo -pix_fmt bgr24 -`.
pub struct RawVideoSource<R> {
    reader: R,
    width:  usize,
    height: usize,
    frames: u64,
    limit:  Option<u64>,
}

impl<R: Read> RawVideoSource<R> {
    pub fn new(reader: R, width: usize, height: usize) -> Self {
        RawVideoSource { reader, width, height, frames: 0, limit: None }
    }

    /// Stop after `frames` frames even if the input continues.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Fill `buf` completely.  Returns how many bytes were read before EOF.
    fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> FrameSource for RawVideoSource<R> {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.limit.is_some_and(|n| self.frames >= n) {
            return None;
        }
        let len = self.width * self.height * 3;
        let mut buf = vec![0u8; len];

        match self.read_full(&mut buf) {
            Ok(0) => {
                info!(frames = self.frames, "raw video input ended");
                None
            }
            Ok(n) if n < len => {
                warn!(frames = self.frames, bytes = n, expected = len, "truncated final frame");
                None
            }
            Ok(_) => {
                self.frames += 1;
                Frame::from_bgr_bytes(self.width, self.height, buf).ok()
            }
            Err(e) => {
                warn!(frames = self.frames, error = %e, "raw video input failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn synthetic_camera_honours_limit() {
        let mut cam = SyntheticCamera::new(32, 16).with_limit(3);
        let frames: Vec<Frame> = std::iter::from_fn(|| cam.next_frame()).collect();
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.width() == 32 && f.height() == 16));
        assert_ne!(frames[0], frames[1]);
    }

    #[test]
    fn raw_source_splits_stream_into_frames() {
        let mut bytes = vec![1u8; 2 * 2 * 3];
        bytes.extend(vec![2u8; 2 * 2 * 3]);
        let mut src = RawVideoSource::new(Cursor::new(bytes), 2, 2);

        assert_eq!(src.next_frame().unwrap().pixel(0, 0), Some(Bgr::new(1, 1, 1)));
        assert_eq!(src.next_frame().unwrap().pixel(1, 1), Some(Bgr::new(2, 2, 2)));
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn raw_source_drops_truncated_frame() {
        let mut src = RawVideoSource::new(Cursor::new(vec![0u8; 12 + 5]), 2, 2);
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn raw_source_honours_limit() {
        let mut src = RawVideoSource::new(Cursor::new(vec![0u8; 12 * 4]), 2, 2).with_limit(2);
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
    }

    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn read_error_ends_stream() {
        let mut src = RawVideoSource::new(Broken, 4, 4);
        assert!(src.next_frame().is_none());
    }
}
