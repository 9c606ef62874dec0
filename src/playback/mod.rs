//! Verse playback: the audio transport seam, the rodio backend, and the
//! play-beginning fade that rides on top of it.

mod fade;
pub mod rodio_transport;
mod session;
mod speed;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use fade::{
    FADE_END, FADE_START, FadeAction, FadeController, FadePhase, FadeState, FadeWindow,
    SAMPLE_MIN_INTERVAL,
};
pub use rodio_transport::{RodioOutput, RodioTransport, RodioTransportFactory};
pub use session::{PlaybackSession, SessionId, SessionSignal};
pub use speed::{MAX_SPEED, MIN_SPEED, PlaybackSpeed, SPEED_STEP};
pub use transport::{
    MediaTransport, PlaybackState, TransportError, TransportEvent, TransportFactory,
};
