//! Session configuration, loaded from TOML and overridden from the command
//! line.
//!
//! ```toml
//! width = 1280
//! height = 720
//! fps = 30
//! spawn_rate = 15
//! background_gray = 20
//! zoom_factor = 1.5   # optional
//! ```
//!
//! Every key is optional; missing keys take the defaults above (without
//! zoom).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::HandParticlesError;

pub const SPAWN_RATE_MIN: usize = 1;
pub const SPAWN_RATE_MAX: usize = 30;
pub const FPS_MAX:        u32   = 120;
/// Largest canvas enlargement; the canvas is `zoom²` times the frame.
pub const ZOOM_MAX:       f32   = 4.0;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub width:           usize,
    pub height:          usize,
    pub fps:             u32,
    /// Particles spawned per frame while a hand is tracked.
    pub spawn_rate:      usize,
    pub background_gray: u8,
    /// Canvas enlargement; `None` keeps the canvas at frame size.
    pub zoom_factor:     Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            width:           1280,
            height:          720,
            fps:             30,
            spawn_rate:      15,
            background_gray: 20,
            zoom_factor:     None,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, HandParticlesError> {
        let text = fs::read_to_string(path).map_err(|source| HandParticlesError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, HandParticlesError> {
        Ok(toml::from_str(text)?)
    }

    /// Reject settings the pipeline cannot run with and clamp the ones that
    /// merely fall outside their slider range.
    pub fn validate(mut self) -> Result<Self, HandParticlesError> {
        if self.width == 0 || self.height == 0 {
            return Err(HandParticlesError::InvalidConfig(
                format!("frame size {}x{} is empty", self.width, self.height),
            ));
        }
        if self.fps == 0 || self.fps > FPS_MAX {
            return Err(HandParticlesError::InvalidConfig(
                format!("fps {} outside 1–{}", self.fps, FPS_MAX),
            ));
        }
        if let Some(z) = self.zoom_factor {
            if !(1.0..=ZOOM_MAX).contains(&z) {
                return Err(HandParticlesError::InvalidConfig(
                    format!("zoom_factor {z} must be between 1.0 and {ZOOM_MAX}"),
                ));
            }
        }

        let clamped = self.spawn_rate.clamp(SPAWN_RATE_MIN, SPAWN_RATE_MAX);
        if clamped != self.spawn_rate {
            warn!(requested = self.spawn_rate, used = clamped, "spawn_rate clamped");
            self.spawn_rate = clamped;
        }
        Ok(self)
    }
}
