//! Buffer playback cursor: channel mapping and rate conversion.

use std::sync::Arc;

use super::DecodedAudio;

/// Reads a decoded buffer frame by frame at the device's rate
///
/// Mono sources fan out to every output channel; multichannel sources map
/// channel to channel, dropping extras and leaving missing channels silent.
/// Rate conversion interpolates linearly between neighbouring source frames.
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    audio: Arc<DecodedAudio>,
    /// Fractional source frame position
    position: f64,
    /// Source frames advanced per output frame
    step: f64,
}

impl PlaybackCursor {
    pub fn new(audio: Arc<DecodedAudio>, output_rate: u32) -> Self {
        let step = if output_rate == 0 {
            1.0
        } else {
            audio.sample_rate as f64 / output_rate as f64
        };
        Self {
            audio,
            position: 0.0,
            step,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.audio.frames() as f64
    }

    /// Fill one output frame and return the mono mix of the source at the
    /// same position
    ///
    /// The mix averages every source channel, independent of how many the
    /// device has. Once the buffer is exhausted the frame is silent and the
    /// mix is 0.0.
    pub fn next_frame(&mut self, out: &mut [f32]) -> f32 {
        if self.is_finished() {
            out.fill(0.0);
            return 0.0;
        }

        let base = self.position.floor() as usize;
        let frac = (self.position - base as f64) as f32;
        let next = (base + 1).min(self.audio.frames() - 1);

        for (channel, slot) in out.iter_mut().enumerate() {
            let a = self.source_sample(base, channel);
            let b = self.source_sample(next, channel);
            *slot = a + (b - a) * frac;
        }

        let a = self.source_mix(base);
        let b = self.source_mix(next);

        self.position += self.step;
        a + (b - a) * frac
    }

    fn source_mix(&self, frame: usize) -> f32 {
        let channels = self.audio.channels.max(1);
        let start = frame * channels;
        self.audio.samples[start..start + channels].iter().sum::<f32>() / channels as f32
    }

    fn source_sample(&self, frame: usize, out_channel: usize) -> f32 {
        let channels = self.audio.channels;
        let source_channel = if channels == 1 { 0 } else { out_channel };
        if source_channel >= channels {
            return 0.0;
        }
        self.audio.samples[frame * channels + source_channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::TimeDomainTap;
    use approx::assert_relative_eq;

    fn audio(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Arc<DecodedAudio> {
        Arc::new(DecodedAudio {
            samples,
            channels,
            sample_rate,
        })
    }

    #[test]
    fn test_same_rate_copies_frames() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.1, 0.2, 0.3, 0.4], 2, 48_000), 48_000);
        let mut frame = [0.0f32; 2];

        cursor.next_frame(&mut frame);
        assert_eq!(frame, [0.1, 0.2]);
        cursor.next_frame(&mut frame);
        assert_eq!(frame, [0.3, 0.4]);
        assert!(cursor.is_finished());
    }

    #[test]
    fn test_mono_fans_out() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.5], 1, 44_100), 44_100);
        let mut frame = [0.0f32; 4];
        cursor.next_frame(&mut frame);
        assert_eq!(frame, [0.5; 4]);
    }

    #[test]
    fn test_missing_channels_are_silent() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.1, 0.2], 2, 44_100), 44_100);
        let mut frame = [9.0f32; 3];
        cursor.next_frame(&mut frame);
        assert_eq!(frame, [0.1, 0.2, 0.0]);
    }

    #[test]
    fn test_extra_channels_are_dropped() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.1, 0.2, 0.3], 3, 44_100), 44_100);
        let mut frame = [0.0f32; 2];
        cursor.next_frame(&mut frame);
        assert_eq!(frame, [0.1, 0.2]);
    }

    #[test]
    fn test_upsampling_interpolates() {
        // 2x output rate: every other output frame is a midpoint
        let mut cursor = PlaybackCursor::new(audio(vec![0.0, 1.0, 0.0], 1, 22_050), 44_100);
        let mut frame = [0.0f32; 1];
        let mut produced = Vec::new();
        while !cursor.is_finished() {
            cursor.next_frame(&mut frame);
            produced.push(frame[0]);
        }

        assert_eq!(produced.len(), 6);
        assert_relative_eq!(produced[0], 0.0);
        assert_relative_eq!(produced[1], 0.5);
        assert_relative_eq!(produced[2], 1.0);
        assert_relative_eq!(produced[3], 0.5);
        assert_relative_eq!(produced[4], 0.0);
        // Last frame has no successor to interpolate toward
        assert_relative_eq!(produced[5], 0.0);
    }

    #[test]
    fn test_downsampling_skips_frames() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.0, 0.1, 0.2, 0.3], 1, 96_000), 48_000);
        let mut frame = [0.0f32; 1];

        cursor.next_frame(&mut frame);
        assert_relative_eq!(frame[0], 0.0);
        cursor.next_frame(&mut frame);
        assert_relative_eq!(frame[0], 0.2);
        assert!(cursor.is_finished());
    }

    #[test]
    fn test_mix_is_independent_of_device_channels() {
        // Full-scale stereo on a 6-channel device
        let mut cursor = PlaybackCursor::new(audio(vec![1.0; 4], 2, 48_000), 48_000);
        let mut tap = TimeDomainTap::new(2);
        let mut frame = [0.0f32; 6];
        while !cursor.is_finished() {
            tap.push(cursor.next_frame(&mut frame));
        }

        assert_eq!(frame, [1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let mut bytes = [0u8; 2];
        tap.fill_bytes(&mut bytes);
        assert_eq!(bytes, [255, 255]);
    }

    #[test]
    fn test_mix_includes_dropped_channels() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.3, 0.3, 0.9], 3, 44_100), 44_100);
        let mut frame = [0.0f32; 2];
        let mix = cursor.next_frame(&mut frame);

        assert_eq!(frame, [0.3, 0.3]);
        assert_relative_eq!(mix, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_mix_interpolates_with_frames() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.0, 0.0, 1.0, 1.0], 2, 22_050), 44_100);
        let mut frame = [0.0f32; 2];
        assert_relative_eq!(cursor.next_frame(&mut frame), 0.0);
        assert_relative_eq!(cursor.next_frame(&mut frame), 0.5);
        assert_relative_eq!(cursor.next_frame(&mut frame), 1.0);
    }

    #[test]
    fn test_exhausted_cursor_outputs_silence() {
        let mut cursor = PlaybackCursor::new(audio(vec![0.7], 1, 44_100), 44_100);
        let mut frame = [0.0f32; 2];
        cursor.next_frame(&mut frame);
        assert_eq!(cursor.next_frame(&mut frame), 0.0);
        assert_eq!(frame, [0.0, 0.0]);
    }
}
