use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ayat::playback::{
    MediaTransport, PlaybackSpeed, TransportError, TransportEvent, TransportFactory,
};

#[derive(Default)]
pub struct FakeState {
    pub path: PathBuf,
    pub queued: VecDeque<TransportEvent>,
    pub volumes: Vec<f32>,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub rate: f32,
}

/// Transport whose events are fed by the test through a shared handle.
#[derive(Clone, Default)]
pub struct FakeTransport {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeTransport {
    pub fn push(&self, event: TransportEvent) {
        self.state.borrow_mut().queued.push_back(event);
    }
}

impl MediaTransport for FakeTransport {
    fn play(&mut self) -> Result<(), TransportError> {
        self.state.borrow_mut().plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.borrow_mut().pauses += 1;
    }

    fn seek(&mut self, position: f64) -> Result<(), TransportError> {
        self.state.borrow_mut().seeks.push(position);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volumes.push(volume);
    }

    fn set_playback_rate(&mut self, speed: PlaybackSpeed) {
        self.state.borrow_mut().rate = speed.as_rate();
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        self.state.borrow_mut().queued.drain(..).collect()
    }
}

/// Opens fake transports that report `duration` once loaded.
#[derive(Clone)]
pub struct FakeFactory {
    pub opened: Rc<RefCell<Vec<FakeTransport>>>,
    pub duration: Option<f64>,
}

impl FakeFactory {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            opened: Rc::default(),
            duration,
        }
    }

    pub fn latest(&self) -> FakeTransport {
        self.opened
            .borrow()
            .last()
            .cloned()
            .expect("no transport opened")
    }

    pub fn opened_count(&self) -> usize {
        self.opened.borrow().len()
    }
}

impl TransportFactory for FakeFactory {
    type Transport = FakeTransport;

    fn open(
        &mut self,
        audio_path: &Path,
        speed: PlaybackSpeed,
    ) -> Result<Self::Transport, TransportError> {
        let mut transport = FakeTransport::default();
        transport.state.borrow_mut().path = audio_path.to_path_buf();
        transport.set_playback_rate(speed);
        transport.push(TransportEvent::Loaded {
            duration: self.duration,
        });
        self.opened.borrow_mut().push(transport.clone());
        Ok(transport)
    }
}
