//! Error types for decoding, playback, rendering and configuration.

use thiserror::Error;

/// Failure to turn a selected file into playable audio.
///
/// File read failures are folded into this type so the session has a single
/// failure path for a load.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported or corrupt audio data: {0}")]
    Codec(#[from] symphonia::core::errors::Error),

    #[error("no decodable audio track found")]
    NoTrack,

    #[error("stream decoded to zero samples")]
    Empty,
}

/// Failure to start playback on the audio device.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,

    #[error("failed to query output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported output sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Failure to set up the GPU surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Invalid parameter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("analysis window must be a power of two >= 32, got {0}")]
    AnalysisWindow(usize),

    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    SurfaceSize { width: u32, height: u32 },

    #[error("mode switch interval must be > 0 ms")]
    SwitchInterval,
}
