//! Device playback through cpal, feeding the time-domain tap.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use std::sync::Arc;

use super::playback::PlaybackCursor;
use super::tap::SharedTap;
use super::{AudioOutput, DecodedAudio, SignalSource};
use crate::error::AudioError;
use crate::params::AnalyserConfig;

/// Plays decoded buffers on the default output device
pub struct CpalOutput {
    analyser: AnalyserConfig,
}

impl CpalOutput {
    pub fn new(analyser: AnalyserConfig) -> Self {
        Self { analyser }
    }
}

/// A running playback stream and the tap on its output
pub struct PlaybackHandle {
    tap: SharedTap,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl SignalSource for PlaybackHandle {
    fn fill_time_domain(&self, out: &mut [u8]) {
        self.tap.fill_time_domain(out);
    }
}

impl AudioOutput for CpalOutput {
    type Source = PlaybackHandle;

    fn play(&mut self, audio: DecodedAudio) -> Result<PlaybackHandle, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device.default_output_config()?;

        tracing::info!(
            "Audio: {} @ {}Hz, {} channel(s); source {}Hz, {} channel(s), {:.1}s",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            supported.sample_rate().0,
            supported.channels(),
            audio.sample_rate,
            audio.channels,
            audio.duration().as_secs_f32()
        );

        let tap = SharedTap::new(self.analyser.window_size);
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();
        let cursor = PlaybackCursor::new(Arc::new(audio), config.sample_rate.0);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, cursor, tap.clone()),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, cursor, tap.clone()),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, cursor, tap.clone()),
            other => return Err(AudioError::UnsupportedSampleFormat(other)),
        }?;

        stream.play()?;

        Ok(PlaybackHandle {
            tap,
            _stream: stream,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut cursor: PlaybackCursor,
    tap: SharedTap,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut frame = vec![0.0f32; channels];

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut tap = tap.lock();
            for out in data.chunks_mut(channels) {
                let mix = cursor.next_frame(&mut frame);
                for (slot, &value) in out.iter_mut().zip(frame.iter()) {
                    *slot = T::from_sample(value);
                }
                // The tap sees the source, not the device channel layout
                tap.push(mix);
            }
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
