//! Moves through the verse catalog and owns the playback session of the current verse.

use thiserror::Error;

use crate::catalog::{Catalog, CatalogDatabase, CatalogError, PlaybackSettings, Verse};
use crate::playback::{
    FadeWindow, PlaybackSession, PlaybackSpeed, SessionId, SessionSignal, TransportError,
    TransportFactory,
};

/// Persistence used by the sequencer for the settings row.
pub trait SettingsStore {
    fn set_current_verse_id(&mut self, id: i64) -> Result<(), CatalogError>;
    fn set_speed(&mut self, speed: PlaybackSpeed) -> Result<(), CatalogError>;
}

impl SettingsStore for CatalogDatabase {
    fn set_current_verse_id(&mut self, id: i64) -> Result<(), CatalogError> {
        CatalogDatabase::set_current_verse_id(self, id)
    }

    fn set_speed(&mut self, speed: PlaybackSpeed) -> Result<(), CatalogError> {
        CatalogDatabase::set_speed(self, speed)
    }
}

/// Errors returned by navigation and speed changes.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("No verse with id {0}")]
    UnknownVerse(i64),
    #[error("No verse for surah {sura} ayah {aya}")]
    UnknownAya { sura: i64, aya: i64 },
    #[error("No surah numbered {0}")]
    UnknownSurah(i64),
    /// Writing the settings row failed; the current verse is unchanged.
    #[error("Failed to save position: {0}")]
    Persist(#[from] CatalogError),
}

/// Behaviour knobs taken from the application config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequencerOptions {
    pub fade: FadeWindow,
    /// Start the next verse automatically after one completes.
    pub autoplay_on_complete: bool,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            fade: FadeWindow::default(),
            autoplay_on_complete: false,
        }
    }
}

/// Current position in the catalog plus the session playing it.
///
/// Every move persists the new verse id first, then drops the old session and
/// opens a fresh transport and fade controller for the new verse.
pub struct NavigationSequencer<S: SettingsStore, F: TransportFactory> {
    catalog: Catalog,
    store: S,
    factory: F,
    options: SequencerOptions,
    index: usize,
    speed: PlaybackSpeed,
    preview_mode: bool,
    session: Option<PlaybackSession<F::Transport>>,
    next_session: u64,
    playback_error: Option<TransportError>,
}

impl<S: SettingsStore, F: TransportFactory> NavigationSequencer<S, F> {
    /// Start at the stored verse, or the first verse when the stored id is unknown.
    pub fn new(
        catalog: Catalog,
        store: S,
        factory: F,
        settings: PlaybackSettings,
        options: SequencerOptions,
    ) -> Self {
        let index = match catalog.index_of(settings.current_verse_id) {
            Some(index) => index,
            None => {
                tracing::warn!(
                    id = settings.current_verse_id,
                    "Stored verse not in catalog, starting at the first verse"
                );
                0
            }
        };
        let mut sequencer = Self {
            catalog,
            store,
            factory,
            options,
            index,
            speed: settings.speed,
            preview_mode: false,
            session: None,
            next_session: 0,
            playback_error: None,
        };
        sequencer.bind_session(false);
        sequencer
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_verse(&self) -> &Verse {
        &self.catalog.verses()[self.index]
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn session(&self) -> Option<&PlaybackSession<F::Transport>> {
        self.session.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.is_playing())
    }

    /// Failure from opening or starting the current verse's audio, if any.
    pub fn playback_error(&self) -> Option<&TransportError> {
        self.playback_error.as_ref()
    }

    pub fn advance(&mut self) -> Result<(), NavigationError> {
        let next = (self.index + 1) % self.catalog.len();
        self.move_to(next, false)
    }

    /// Advance and start the new verse as soon as it has loaded.
    pub fn advance_and_play(&mut self) -> Result<(), NavigationError> {
        let next = (self.index + 1) % self.catalog.len();
        self.move_to(next, true)
    }

    pub fn retreat(&mut self) -> Result<(), NavigationError> {
        let len = self.catalog.len();
        let previous = (self.index + len - 1) % len;
        self.move_to(previous, false)
    }

    pub fn jump_to(&mut self, id: i64) -> Result<(), NavigationError> {
        let index = self
            .catalog
            .index_of(id)
            .ok_or(NavigationError::UnknownVerse(id))?;
        self.move_to(index, false)
    }

    pub fn jump_to_aya(&mut self, sura: i64, aya: i64) -> Result<(), NavigationError> {
        let index = self
            .catalog
            .index_of_aya(sura, aya)
            .ok_or(NavigationError::UnknownAya { sura, aya })?;
        self.move_to(index, false)
    }

    /// Jump to the first verse of a surah.
    pub fn jump_to_surah(&mut self, sura: i64) -> Result<(), NavigationError> {
        let index = self
            .catalog
            .surahs()
            .get(sura)
            .map(|entry| entry.first_index)
            .ok_or(NavigationError::UnknownSurah(sura))?;
        self.move_to(index, false)
    }

    /// Play the current verse at full volume; in preview mode it restarts from the top.
    pub fn play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("Play ignored, no audio loaded");
            return;
        };
        if self.preview_mode {
            session.arm();
        }
        if let Err(err) = session.play() {
            tracing::warn!(session = %session.id(), "Playback failed: {err}");
            self.playback_error = Some(err);
        }
    }

    pub fn pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pause();
        }
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// Turn "play beginning of verse" on or off for this and later verses.
    ///
    /// A verse that is already playing keeps playing untouched; the fade only
    /// applies once [`play`](Self::play) restarts it from the top.
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview_mode = enabled;
        if let Some(session) = self.session.as_mut() {
            if !enabled {
                session.disarm();
            } else if session.is_playing() {
                tracing::debug!(session = %session.id(), "Preview waits for the next play");
            } else {
                session.arm();
            }
        }
        tracing::info!(enabled, "Preview mode changed");
    }

    pub fn toggle_preview_mode(&mut self) {
        self.set_preview_mode(!self.preview_mode);
    }

    /// Persist and apply a playback speed.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) -> Result<(), NavigationError> {
        if speed == self.speed {
            return Ok(());
        }
        self.store.set_speed(speed)?;
        self.speed = speed;
        if let Some(session) = self.session.as_mut() {
            session.set_speed(speed);
        }
        tracing::info!(%speed, "Playback speed changed");
        Ok(())
    }

    pub fn speed_up(&mut self) -> Result<(), NavigationError> {
        self.set_speed(self.speed.faster())
    }

    pub fn speed_down(&mut self) -> Result<(), NavigationError> {
        self.set_speed(self.speed.slower())
    }

    /// Drain the active session; a completed verse moves on to the next one.
    ///
    /// The finished session never reports again, so the move happens even when
    /// saving the new position fails; that error is returned afterwards.
    pub fn pump(&mut self) -> Result<Vec<SessionSignal>, NavigationError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Vec::new());
        };
        let signals = session.pump();
        for signal in &signals {
            match signal {
                SessionSignal::PreviewFinished => {
                    tracing::debug!("Preview finished");
                }
                SessionSignal::Completed => {
                    tracing::info!(id = self.current_verse().id, "Verse completed");
                    let next = (self.index + 1) % self.catalog.len();
                    let saved = self
                        .store
                        .set_current_verse_id(self.catalog.verses()[next].id);
                    self.enter(next, self.options.autoplay_on_complete);
                    saved?;
                    break;
                }
            }
        }
        Ok(signals)
    }

    fn move_to(&mut self, index: usize, autoplay: bool) -> Result<(), NavigationError> {
        let id = self.catalog.verses()[index].id;
        self.store.set_current_verse_id(id)?;
        self.enter(index, autoplay);
        Ok(())
    }

    fn enter(&mut self, index: usize, autoplay: bool) {
        self.index = index;
        tracing::info!(id = self.current_verse().id, index, "Moved to verse");
        self.bind_session(autoplay);
    }

    fn bind_session(&mut self, play_on_load: bool) {
        self.session = None;
        let verse = &self.catalog.verses()[self.index];
        match self.factory.open(&verse.audio_path, self.speed) {
            Ok(transport) => {
                self.next_session += 1;
                let mut session = PlaybackSession::new(
                    SessionId(self.next_session),
                    transport,
                    self.options.fade,
                    play_on_load,
                );
                if self.preview_mode {
                    session.arm();
                }
                self.session = Some(session);
                self.playback_error = None;
            }
            Err(err) => {
                tracing::warn!(id = verse.id, "Could not open verse audio: {err}");
                self.playback_error = Some(err);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn factory(&self) -> &F {
        &self.factory
    }
}
