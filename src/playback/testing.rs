//! In-memory transport used by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::speed::PlaybackSpeed;
use super::transport::{MediaTransport, TransportError, TransportEvent, TransportFactory};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TransportCall {
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    SetRate(f32),
}

#[derive(Default)]
struct Inner {
    queued: VecDeque<TransportEvent>,
    calls: Vec<TransportCall>,
}

/// Transport whose events are pushed by the test. Clones share state, so a
/// test can keep a handle after the session takes ownership.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    inner: Rc<RefCell<Inner>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, event: TransportEvent) {
        self.inner.borrow_mut().queued.push_back(event);
    }

    pub(crate) fn calls(&self) -> Vec<TransportCall> {
        self.inner.borrow().calls.clone()
    }

    pub(crate) fn count(&self, call: TransportCall) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|made| **made == call)
            .count()
    }

    pub(crate) fn volumes(&self) -> Vec<f32> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                TransportCall::SetVolume(volume) => Some(*volume),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: TransportCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl MediaTransport for ScriptedTransport {
    fn play(&mut self) -> Result<(), TransportError> {
        self.record(TransportCall::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.record(TransportCall::Pause);
    }

    fn seek(&mut self, position: f64) -> Result<(), TransportError> {
        self.record(TransportCall::Seek(position));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(TransportCall::SetVolume(volume));
    }

    fn set_playback_rate(&mut self, speed: PlaybackSpeed) {
        self.record(TransportCall::SetRate(speed.as_rate()));
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        self.inner.borrow_mut().queued.drain(..).collect()
    }
}

/// Factory that hands out scripted transports and remembers each one.
#[derive(Default)]
pub(crate) struct ScriptedFactory {
    pub(crate) opened: Vec<(PathBuf, ScriptedTransport)>,
    /// Paths whose open call fails.
    pub(crate) broken: Vec<PathBuf>,
    /// Duration reported by the `Loaded` event queued on open.
    pub(crate) duration: Option<f64>,
}

impl ScriptedFactory {
    pub(crate) fn latest(&self) -> &ScriptedTransport {
        &self.opened.last().expect("no transport opened").1
    }
}

impl TransportFactory for ScriptedFactory {
    type Transport = ScriptedTransport;

    fn open(
        &mut self,
        audio_path: &Path,
        speed: PlaybackSpeed,
    ) -> Result<Self::Transport, TransportError> {
        if self.broken.iter().any(|path| path == audio_path) {
            return Err(TransportError::Open {
                path: audio_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            });
        }
        let mut transport = ScriptedTransport::default();
        transport.set_playback_rate(speed);
        transport.push(TransportEvent::Loaded {
            duration: self.duration,
        });
        self.opened
            .push((audio_path.to_path_buf(), transport.clone()));
        Ok(transport)
    }
}
