//! UI-facing wrapper around the navigation sequencer.

use crate::catalog::SurahEntry;
use crate::commands::{self, Command};
use crate::navigation::{NavigationSequencer, SettingsStore};
use crate::playback::TransportFactory;

use super::state::{StatusBarState, StatusTone};

/// Holds the sequencer plus the last user-facing error.
pub struct PlayerController<S: SettingsStore, F: TransportFactory> {
    sequencer: NavigationSequencer<S, F>,
    notice: Option<String>,
}

impl<S: SettingsStore, F: TransportFactory> PlayerController<S, F> {
    pub fn new(sequencer: NavigationSequencer<S, F>) -> Self {
        Self {
            sequencer,
            notice: None,
        }
    }

    pub fn sequencer(&self) -> &NavigationSequencer<S, F> {
        &self.sequencer
    }

    /// Run a command; failures end up in the status line.
    pub fn handle(&mut self, command: Command) {
        match commands::dispatch(&mut self.sequencer, command) {
            Ok(()) => self.notice = None,
            Err(err) => {
                tracing::warn!(?command, "Command failed: {err}");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Drain audio events. Returns true while audio is playing.
    pub fn tick(&mut self) -> bool {
        if let Err(err) = self.sequencer.pump() {
            tracing::warn!("Advancing after completion failed: {err}");
            self.notice = Some(err.to_string());
        }
        self.sequencer.is_playing()
    }

    pub fn status(&self) -> StatusBarState {
        let text = self.sequencer.current_verse().status_label();
        if let Some(notice) = &self.notice {
            return StatusBarState::new(text, StatusTone::Error, Some(notice.clone()));
        }
        if let Some(err) = self.sequencer.playback_error() {
            return StatusBarState::new(text, StatusTone::Warning, Some(err.to_string()));
        }
        let tone = if self.sequencer.is_playing() {
            StatusTone::Playing
        } else {
            StatusTone::Idle
        };
        StatusBarState::new(text, tone, None)
    }

    pub fn speed_label(&self) -> String {
        format!("Speed: {}", self.sequencer.speed())
    }

    pub fn surahs(&self) -> &[SurahEntry] {
        self.sequencer.catalog().surahs().entries()
    }

    /// Surah of the current verse.
    pub fn current_surah(&self) -> Option<&SurahEntry> {
        let number = self.sequencer.current_verse().sura_number;
        self.sequencer.catalog().surahs().get(number)
    }

    pub fn preview_mode(&self) -> bool {
        self.sequencer.preview_mode()
    }
}
