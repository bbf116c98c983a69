use thiserror::Error;

/// Failures while bringing up or driving the audio session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no output device available")]
    NoDevice,

    #[error("no output device matching '{0}'")]
    DeviceNotFound(String),

    #[error("could not enumerate output devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("could not query default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("could not build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("could not start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("could not pause output stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),
}
