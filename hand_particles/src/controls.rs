//! Runtime controls — the knobs a user can turn while the session runs.

use crate::compositor::CompositorSettings;
use crate::config::{SessionConfig, SPAWN_RATE_MAX, SPAWN_RATE_MIN};

/// Zoom used by the toggle when the config file names none.
pub const DEFAULT_TOGGLE_ZOOM: f32 = 1.5;
const GRAY_STEP: u8 = 5;

/// A control change requested from the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    SpawnRateUp,
    SpawnRateDown,
    BackgroundUp,
    BackgroundDown,
    ToggleZoom,
    TogglePause,
    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeControls {
    pub spawn_rate:      usize,
    pub background_gray: u8,
    pub zoom_enabled:    bool,
    pub zoom_factor:     f32,
    pub paused:          bool,
}

impl RuntimeControls {
    pub fn from_config(cfg: &SessionConfig) -> Self {
        RuntimeControls {
            spawn_rate:      cfg.spawn_rate.clamp(SPAWN_RATE_MIN, SPAWN_RATE_MAX),
            background_gray: cfg.background_gray,
            zoom_enabled:    cfg.zoom_factor.is_some(),
            zoom_factor:     cfg.zoom_factor.unwrap_or(DEFAULT_TOGGLE_ZOOM),
            paused:          false,
        }
    }

    /// Apply one event.  Returns `false` for [`ControlEvent::Quit`].
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::SpawnRateUp =>
                self.spawn_rate = (self.spawn_rate + 1).min(SPAWN_RATE_MAX),
            ControlEvent::SpawnRateDown =>
                self.spawn_rate = self.spawn_rate.saturating_sub(1).max(SPAWN_RATE_MIN),
            ControlEvent::BackgroundUp =>
                self.background_gray = self.background_gray.saturating_add(GRAY_STEP),
            ControlEvent::BackgroundDown =>
                self.background_gray = self.background_gray.saturating_sub(GRAY_STEP),
            ControlEvent::ToggleZoom  => self.zoom_enabled = !self.zoom_enabled,
            ControlEvent::TogglePause => self.paused = !self.paused,
            ControlEvent::Quit        => return false,
        }
        true
    }

    /// Snapshot for the next composed frame.
    pub fn settings(&self) -> CompositorSettings {
        CompositorSettings {
            spawn_rate:      self.spawn_rate,
            background_gray: self.background_gray,
            zoom_factor:     self.zoom_enabled.then_some(self.zoom_factor),
        }
    }

    pub fn status(&self) -> String {
        format!(
            "spawn {}  bg {}  zoom {}{}",
            self.spawn_rate,
            self.background_gray,
            if self.zoom_enabled { format!("{:.1}x", self.zoom_factor) } else { "off".to_string() },
            if self.paused { "  [paused]" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> RuntimeControls {
        RuntimeControls::from_config(&SessionConfig::default())
    }

    #[test]
    fn defaults_follow_config() {
        let c = controls();
        assert_eq!(c.settings(), CompositorSettings { spawn_rate: 15, background_gray: 20, zoom_factor: None });
    }

    #[test]
    fn spawn_rate_stays_in_range() {
        let mut c = controls();
        for _ in 0..50 { c.apply(ControlEvent::SpawnRateUp); }
        assert_eq!(c.spawn_rate, 30);
        for _ in 0..50 { c.apply(ControlEvent::SpawnRateDown); }
        assert_eq!(c.spawn_rate, 1);
    }

    #[test]
    fn background_saturates() {
        let mut c = controls();
        for _ in 0..100 { c.apply(ControlEvent::BackgroundUp); }
        assert_eq!(c.background_gray, 255);
        for _ in 0..100 { c.apply(ControlEvent::BackgroundDown); }
        assert_eq!(c.background_gray, 0);
    }

    #[test]
    fn zoom_toggle_uses_configured_factor() {
        let cfg = SessionConfig { zoom_factor: Some(2.0), ..Default::default() };
        let mut c = RuntimeControls::from_config(&cfg);
        assert_eq!(c.settings().zoom_factor, Some(2.0));
        c.apply(ControlEvent::ToggleZoom);
        assert_eq!(c.settings().zoom_factor, None);

        let mut c = controls();
        c.apply(ControlEvent::ToggleZoom);
        assert_eq!(c.settings().zoom_factor, Some(DEFAULT_TOGGLE_ZOOM));
    }

    #[test]
    fn quit_stops_and_pause_toggles() {
        let mut c = controls();
        assert!(c.apply(ControlEvent::TogglePause));
        assert!(c.paused);
        assert!(c.status().ends_with("[paused]"));
        assert!(!c.apply(ControlEvent::Quit));
    }
}
