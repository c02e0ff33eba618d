//! Audio sink abstraction used by synthesis workers.

use thiserror::Error;

/// Output format requested from an opener.
///
/// Samples are always 8-bit signed mono; only the rate and the buffer size
/// vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFormat {
    /// Samples per second
    pub sample_rate: u32,
    /// Buffered samples before `write` starts blocking
    pub buffer_len: usize,
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("no default audio output device available")]
    NoDevice,

    #[error("failed to fetch default output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("unsupported device sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("audio sink disconnected")]
    Disconnected,

    #[error("audio sink already stopped")]
    Stopped,
}

/// Destination for a worker's samples.
///
/// A sink is opened, written and closed on the same worker thread, so it
/// does not need to be `Send`.
pub trait AudioSink {
    /// Queue one sample, blocking until the sink has room for it.
    ///
    /// The blocking is what paces the synthesis loop.
    fn write(&mut self, sample: i8) -> Result<(), SinkError>;

    /// Refuse further writes
    fn stop(&mut self) {}

    /// Accept writes again after `stop`, keeping whatever is still queued
    fn resume(&mut self) {}

    /// Wait for already-queued samples to play out
    fn drain(&mut self) {}

    /// Release the underlying output
    fn close(&mut self) {}
}

/// Factory for sinks, shared by every worker of a launcher.
pub trait SinkOpener: Send + Sync {
    fn open(&self, format: &SinkFormat) -> Result<Box<dyn AudioSink>, SinkError>;
}

impl<T: SinkOpener + ?Sized> SinkOpener for std::sync::Arc<T> {
    fn open(&self, format: &SinkFormat) -> Result<Box<dyn AudioSink>, SinkError> {
        (**self).open(format)
    }
}
