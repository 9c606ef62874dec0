use std::fmt;

use super::fade::{FadeAction, FadeController, FadeWindow};
use super::speed::PlaybackSpeed;
use super::transport::{MediaTransport, PlaybackState, TransportError, TransportEvent};

/// Identifies one session for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Things a session reports back to its owner after pumping events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSignal {
    /// The clip played to the end.
    Completed,
    /// The armed fade reached its end and paused playback.
    PreviewFinished,
}

/// One transport paired with the fade controller that listens to it.
///
/// Transport events only reach the controller through [`PlaybackSession::pump`],
/// so a session that has been replaced can no longer affect anything.
pub struct PlaybackSession<T: MediaTransport> {
    id: SessionId,
    transport: T,
    fade: FadeController,
    state: Option<PlaybackState>,
}

impl<T: MediaTransport> PlaybackSession<T> {
    pub fn new(id: SessionId, transport: T, window: FadeWindow, play_on_load: bool) -> Self {
        Self {
            id,
            transport,
            fade: FadeController::new(window, play_on_load),
            state: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn fade(&self) -> &FadeController {
        &self.fade
    }

    /// Last play state requested or reported by the transport.
    pub fn state(&self) -> Option<PlaybackState> {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == Some(PlaybackState::Playing)
    }

    pub fn arm(&mut self) {
        self.fade.arm();
        tracing::debug!(session = %self.id, "Play-beginning armed");
    }

    pub fn disarm(&mut self) {
        let action = self.fade.disarm();
        self.apply(action);
        tracing::debug!(session = %self.id, "Play-beginning disarmed");
    }

    /// Start playback at full volume. An armed session restarts from the top.
    pub fn play(&mut self) -> Result<(), TransportError> {
        if self.fade.is_armed() {
            self.transport.seek(0.0)?;
        }
        let volume = self.fade.on_play_requested();
        self.transport.set_volume(volume);
        self.transport.play()?;
        self.state = Some(PlaybackState::Playing);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.transport.pause();
        self.state = Some(PlaybackState::Paused);
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.transport.set_playback_rate(speed);
    }

    /// Feed pending transport events through the fade controller.
    pub fn pump(&mut self) -> Vec<SessionSignal> {
        let mut signals = Vec::new();
        for event in self.transport.poll_events() {
            match event {
                TransportEvent::Loaded { duration } => {
                    tracing::debug!(session = %self.id, ?duration, "Audio loaded");
                    let action = self.fade.on_loaded(duration);
                    self.apply(action);
                }
                TransportEvent::PositionChanged(position) => {
                    let action = self.fade.on_position_changed(position);
                    if matches!(action, FadeAction::Pause { .. }) {
                        signals.push(SessionSignal::PreviewFinished);
                    }
                    self.apply(action);
                }
                TransportEvent::StateChanged(state) => {
                    tracing::debug!(session = %self.id, ?state, "Audio state changed");
                    self.state = Some(state);
                    if self.fade.on_state_changed(state) {
                        signals.push(SessionSignal::Completed);
                    }
                }
            }
        }
        signals
    }

    fn apply(&mut self, action: FadeAction) {
        match action {
            FadeAction::Nothing => {}
            FadeAction::Play { volume } => {
                self.transport.set_volume(volume.clamp(0.0, 1.0));
                match self.transport.play() {
                    Ok(()) => self.state = Some(PlaybackState::Playing),
                    Err(err) => tracing::warn!(session = %self.id, "Autoplay failed: {err}"),
                }
            }
            FadeAction::SetVolume(volume) => {
                self.transport.set_volume(volume.clamp(0.0, 1.0));
            }
            FadeAction::Pause { volume } => {
                self.transport.pause();
                self.state = Some(PlaybackState::Paused);
                self.transport.set_volume(volume.clamp(0.0, 1.0));
            }
        }
    }
}
