//! "Play beginning of verse" fade.
//!
//! Once armed, the controller watches position updates for the current clip.
//! Volume stays at full until [`FADE_START`] of the duration, falls along a
//! quadratic curve until [`FADE_END`], and the first update past the end pauses
//! playback and disarms.
//!
//! ```text
//! Idle --arm--> PreFade --pos > start--> Fading --pos > end--> (pause) --> Idle
//! ```
//!
//! The controller is pure state: every handler returns a [`FadeAction`] for the
//! owning [`PlaybackSession`](super::PlaybackSession) to apply to its transport.

use serde::{Deserialize, Serialize};

/// Fraction of the clip at which the fade begins.
pub const FADE_START: f64 = 0.30;
/// Fraction of the clip at which playback is paused.
pub const FADE_END: f64 = 0.60;
/// Minimum position delta, in seconds, between two volume updates.
pub const SAMPLE_MIN_INTERVAL: f64 = 0.10;

const FULL_VOLUME: f32 = 1.0;

/// Position window, as fractions of the clip duration, over which the fade runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeWindow {
    pub start: f64,
    pub end: f64,
    /// Seconds of media time between volume updates.
    pub min_sample_interval: f64,
}

impl Default for FadeWindow {
    fn default() -> Self {
        Self {
            start: FADE_START,
            end: FADE_END,
            min_sample_interval: SAMPLE_MIN_INTERVAL,
        }
    }
}

impl FadeWindow {
    /// True when `0 <= start < end <= 1` and the interval is positive.
    pub fn is_valid(&self) -> bool {
        let in_unit = |value: f64| (0.0..=1.0).contains(&value);
        in_unit(self.start)
            && in_unit(self.end)
            && self.start < self.end
            && self.min_sample_interval.is_finite()
            && self.min_sample_interval > 0.0
    }

    /// Return `self` if valid, otherwise the default window.
    pub fn normalized(self) -> Self {
        if self.is_valid() {
            self
        } else {
            tracing::warn!(
                start = self.start,
                end = self.end,
                interval = self.min_sample_interval,
                "Invalid fade window; using defaults"
            );
            Self::default()
        }
    }
}

/// What the session must do to its transport after a controller callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FadeAction {
    Nothing,
    /// Start playback at the given volume.
    Play { volume: f32 },
    SetVolume(f32),
    /// Pause, then restore the given volume for whatever plays next.
    Pause { volume: f32 },
}

/// Where the controller is in the fade sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    Idle,
    PreFade,
    Fading,
}

/// Per-session fade bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeState {
    pub armed: bool,
    /// Clip length in seconds, unknown until the transport reports it.
    pub duration: Option<f64>,
    pub volume: f32,
    /// Position of the last applied volume update.
    pub last_sample_time: Option<f64>,
}

impl Default for FadeState {
    fn default() -> Self {
        Self {
            armed: false,
            duration: None,
            volume: FULL_VOLUME,
            last_sample_time: None,
        }
    }
}

/// Fade state machine for one transport.
#[derive(Clone, Debug)]
pub struct FadeController {
    window: FadeWindow,
    state: FadeState,
    play_on_load: bool,
}

impl FadeController {
    pub fn new(window: FadeWindow, play_on_load: bool) -> Self {
        Self {
            window,
            state: FadeState::default(),
            play_on_load,
        }
    }

    pub fn state(&self) -> &FadeState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    pub fn phase(&self) -> FadePhase {
        match (self.state.armed, self.state.last_sample_time) {
            (false, _) => FadePhase::Idle,
            (true, None) => FadePhase::PreFade,
            (true, Some(_)) => FadePhase::Fading,
        }
    }

    /// Enable the fade for this clip. Arming again leaves it armed and clears
    /// the throttle mark, so the next pass through the window starts fresh.
    pub fn arm(&mut self) {
        self.state.armed = true;
        self.state.last_sample_time = None;
    }

    /// Cancel the fade and restore full volume.
    pub fn disarm(&mut self) -> FadeAction {
        self.state.armed = false;
        self.state.last_sample_time = None;
        self.state.volume = FULL_VOLUME;
        FadeAction::SetVolume(FULL_VOLUME)
    }

    /// Volume for a user-initiated play: always full.
    pub fn on_play_requested(&mut self) -> f32 {
        self.state.volume = FULL_VOLUME;
        // A replay passes through the window again; the old throttle mark would block it.
        self.state.last_sample_time = None;
        FULL_VOLUME
    }

    /// Record the clip duration. Negative or non-finite durations are treated as zero.
    pub fn on_loaded(&mut self, duration: Option<f64>) -> FadeAction {
        self.state.duration = duration.map(|value| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                0.0
            }
        });
        if self.play_on_load {
            self.play_on_load = false;
            self.state.volume = FULL_VOLUME;
            return FadeAction::Play {
                volume: FULL_VOLUME,
            };
        }
        FadeAction::Nothing
    }

    /// Apply the fade curve for a position update.
    pub fn on_position_changed(&mut self, position: f64) -> FadeAction {
        if !self.state.armed || !position.is_finite() {
            return FadeAction::Nothing;
        }
        let Some(duration) = self.state.duration else {
            return FadeAction::Nothing;
        };
        let start_t = duration * self.window.start;
        let end_t = duration * self.window.end;

        // Pause is checked first: a zero-length window reaches it without dividing.
        if position > end_t {
            self.state.armed = false;
            self.state.last_sample_time = None;
            self.state.volume = FULL_VOLUME;
            tracing::debug!(position, end_t, "Fade window passed; pausing");
            return FadeAction::Pause {
                volume: FULL_VOLUME,
            };
        }
        if position <= start_t {
            return FadeAction::Nothing;
        }

        if let Some(last) = self.state.last_sample_time
            && position < end_t
            && (position - last).abs() < self.window.min_sample_interval
        {
            return FadeAction::Nothing;
        }
        self.state.last_sample_time = Some(position);

        let span = end_t - start_t;
        let progress = if span > 0.0 {
            ((position - start_t) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let volume = ((1.0 - progress).powi(2) as f32).clamp(0.0, 1.0);
        self.state.volume = volume;
        FadeAction::SetVolume(volume)
    }

    /// Returns true when the owner should move on to the next verse.
    pub fn on_state_changed(&mut self, state: super::PlaybackState) -> bool {
        matches!(state, super::PlaybackState::Completed)
    }
}
