use std::fmt;

/// Slowest supported playback rate.
pub const MIN_SPEED: f64 = 0.5;
/// Fastest supported playback rate.
pub const MAX_SPEED: f64 = 2.0;
/// Increment used by the speed buttons.
pub const SPEED_STEP: f64 = 0.1;

/// Playback rate kept inside `[MIN_SPEED, MAX_SPEED]` on a `0.1` grid.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Normal speed.
    pub const NORMAL: Self = Self(1.0);

    /// Clamp and round `value` onto the speed grid. Non-finite input maps to normal speed.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NORMAL;
        }
        let rounded = (value / SPEED_STEP).round() * SPEED_STEP;
        // Re-round to one decimal so 0.1 steps compare equal after many nudges.
        let tidy = (rounded * 10.0).round() / 10.0;
        Self(tidy.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// One step faster, saturating at [`MAX_SPEED`].
    pub fn faster(self) -> Self {
        Self::new(self.0 + SPEED_STEP)
    }

    /// One step slower, saturating at [`MIN_SPEED`].
    pub fn slower(self) -> Self {
        Self::new(self.0 - SPEED_STEP)
    }

    /// Rate handed to the audio backend.
    pub fn as_rate(self) -> f32 {
        self.0 as f32
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}
