//! Error types for the ping engine

use thiserror::Error;

/// The output device could not be opened or started.
///
/// This is a degraded condition: the engine stays usable but silent.
#[derive(Error, Debug)]
pub enum DeviceOpenError {
    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("Output device '{0}' not found")]
    DeviceNotFound(String),

    #[error("Failed to enumerate devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("Failed to read device name: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),

    #[error("Failed to get default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to get supported configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to play audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to open audio device: {0}")]
    DeviceOpen(#[from] DeviceOpenError),

    #[error("Failed to allocate echo buffer of {samples} samples")]
    EchoAllocation { samples: usize },

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse engine config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read engine config: {0}")]
    ConfigRead(#[from] std::io::Error),
}
