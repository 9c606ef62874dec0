use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::speed::PlaybackSpeed;
use super::transport::{
    MediaTransport, PlaybackState, TransportError, TransportEvent, TransportFactory,
};

type FileDecoder = Decoder<BufReader<File>>;

/// Default output device shared by every verse transport.
pub struct RodioOutput {
    stream: OutputStream,
}

impl RodioOutput {
    /// Open the system default output stream.
    pub fn open_default() -> Result<Self, TransportError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| TransportError::Output(err.to_string()))?;
        Ok(Self { stream })
    }
}

/// Opens one [`RodioTransport`] per verse on a shared output stream.
pub struct RodioTransportFactory {
    output: RodioOutput,
    position_interval: Duration,
}

impl RodioTransportFactory {
    pub fn new(output: RodioOutput, position_interval: Duration) -> Self {
        Self {
            output,
            position_interval,
        }
    }
}

impl TransportFactory for RodioTransportFactory {
    type Transport = RodioTransport;

    fn open(
        &mut self,
        audio_path: &Path,
        speed: PlaybackSpeed,
    ) -> Result<Self::Transport, TransportError> {
        let (decoder, duration) = open_decoder(audio_path)?;
        let sink = Sink::connect_new(self.output.stream.mixer());
        sink.pause();
        sink.set_speed(speed.as_rate());
        sink.append(decoder);
        tracing::debug!(path = %audio_path.display(), ?duration, "Opened verse audio");
        let mut events = VecDeque::new();
        events.push_back(TransportEvent::Loaded { duration });
        Ok(RodioTransport {
            path: audio_path.to_path_buf(),
            sink,
            events,
            playing: false,
            drained: false,
            position_interval: self.position_interval,
            last_position: None,
            last_report: None,
        })
    }
}

/// `rodio` sink playing a single verse file.
///
/// Position and completion are sampled when events are polled, so the UI
/// repaint cadence bounds how often `PositionChanged` fires.
pub struct RodioTransport {
    path: PathBuf,
    sink: Sink,
    events: VecDeque<TransportEvent>,
    playing: bool,
    /// The sink ran out of samples and needs the file appended again.
    drained: bool,
    position_interval: Duration,
    last_position: Option<f64>,
    last_report: Option<Instant>,
}

impl RodioTransport {
    fn reload_if_drained(&mut self) -> Result<(), TransportError> {
        if !self.drained {
            return Ok(());
        }
        let (decoder, _) = open_decoder(&self.path)?;
        self.sink.pause();
        self.sink.append(decoder);
        self.drained = false;
        Ok(())
    }

    fn sample_position(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_report
            && now.duration_since(last) < self.position_interval
        {
            return;
        }
        let position = self.sink.get_pos().as_secs_f64();
        if self.last_position == Some(position) {
            return;
        }
        self.last_position = Some(position);
        self.last_report = Some(now);
        self.events
            .push_back(TransportEvent::PositionChanged(position));
    }
}

impl MediaTransport for RodioTransport {
    fn play(&mut self) -> Result<(), TransportError> {
        self.reload_if_drained()?;
        self.sink.play();
        if !self.playing {
            self.playing = true;
            self.events
                .push_back(TransportEvent::StateChanged(PlaybackState::Playing));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
        if self.playing {
            self.playing = false;
            self.events
                .push_back(TransportEvent::StateChanged(PlaybackState::Paused));
        }
    }

    fn seek(&mut self, position: f64) -> Result<(), TransportError> {
        self.reload_if_drained()?;
        let target = Duration::from_secs_f64(position.max(0.0));
        self.sink
            .try_seek(target)
            .map_err(|err| TransportError::Seek(err.to_string()))?;
        self.last_position = None;
        self.last_report = None;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn set_playback_rate(&mut self, speed: PlaybackSpeed) {
        self.sink.set_speed(speed.as_rate());
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        if self.playing {
            if self.sink.empty() {
                self.playing = false;
                self.drained = true;
                self.events
                    .push_back(TransportEvent::StateChanged(PlaybackState::Completed));
            } else {
                self.sample_position();
            }
        }
        self.events.drain(..).collect()
    }
}

fn open_decoder(path: &Path) -> Result<(FileDecoder, Option<f64>), TransportError> {
    let file = File::open(path).map_err(|source| TransportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_len = file.metadata().map(|meta| meta.len()).ok();
    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_seekable(true);
    if let Some(len) = byte_len {
        builder = builder.with_byte_len(len);
    }
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        builder = builder.with_hint(extension);
    }
    let decoder = builder.build().map_err(|err| TransportError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let duration = decoder
        .total_duration()
        .map(|duration| duration.as_secs_f64());
    Ok((decoder, duration))
}
