use std::path::{Path, PathBuf};

use thiserror::Error;

use super::speed::PlaybackSpeed;

/// Play state reported by a transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    /// The clip played to its end.
    Completed,
}

/// Notification raised by a transport, drained with [`MediaTransport::poll_events`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportEvent {
    /// The clip is ready; `duration` is in seconds when the decoder knows it.
    Loaded { duration: Option<f64> },
    /// Periodic position update while playing, in seconds of media time.
    PositionChanged(f64),
    StateChanged(PlaybackState),
}

/// Errors raised while opening or driving a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No audio output device could be opened.
    #[error("Audio output unavailable: {0}")]
    Output(String),
    /// The audio file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The audio file could not be decoded.
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    /// Seeking within the clip failed.
    #[error("Seek failed: {0}")]
    Seek(String),
}

/// Audio object for a single clip.
///
/// Implementations queue [`TransportEvent`]s as they happen and hand them out
/// in order from `poll_events`. Dropping a transport discards anything still
/// queued, which is how events from a replaced clip are kept away from the
/// next one.
pub trait MediaTransport {
    fn play(&mut self) -> Result<(), TransportError>;
    fn pause(&mut self);
    /// Move the playhead to `position` seconds.
    fn seek(&mut self, position: f64) -> Result<(), TransportError>;
    /// Set the gain; callers pass values in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    fn set_playback_rate(&mut self, speed: PlaybackSpeed);
    /// Drain events raised since the previous call, oldest first.
    fn poll_events(&mut self) -> Vec<TransportEvent>;
}

/// Builds one transport per verse.
pub trait TransportFactory {
    type Transport: MediaTransport;

    /// Open `audio_path` paused at position zero with the given rate applied.
    fn open(
        &mut self,
        audio_path: &Path,
        speed: PlaybackSpeed,
    ) -> Result<Self::Transport, TransportError>;
}
