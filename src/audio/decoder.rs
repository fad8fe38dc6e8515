//! File loading and decoding into an interleaved `f32` buffer.

use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DecodeError;

/// Fully decoded audio, ready to play
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Interleaved samples, nominally in -1..1
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Number of sample frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1)
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

/// Decode an in-memory encoded file
///
/// `extension` is only a hint for format probing; content sniffing decides.
/// Corrupt packets are skipped; a stream that yields nothing is an error.
pub fn decode(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedAudio, DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                tracing::warn!("Skipping corrupt packet: {}", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let channels = channels.filter(|&c| c > 0).ok_or(DecodeError::NoTrack)?;
    let sample_rate = sample_rate.filter(|&r| r > 0).ok_or(DecodeError::NoTrack)?;
    if samples.len() < channels {
        return Err(DecodeError::Empty);
    }

    Ok(DecodedAudio {
        samples,
        channels,
        sample_rate,
    })
}

/// Read and decode a file from disk
pub fn load_file(path: &Path) -> Result<DecodedAudio, DecodeError> {
    let bytes = std::fs::read(path)?;
    let extension = path.extension().and_then(|e| e.to_str());
    decode(bytes, extension)
}

/// Read and decode on a worker thread, handing the result to `on_done`
///
/// One-shot: the load cannot be cancelled and is never retried.
pub fn spawn_load<F>(path: PathBuf, on_done: F) -> thread::JoinHandle<()>
where
    F: FnOnce(Result<DecodedAudio, DecodeError>) + Send + 'static,
{
    thread::spawn(move || {
        tracing::debug!("Loading {}", path.display());
        on_done(load_file(&path));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::mpsc;

    fn wav_bytes(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_stereo_wav() {
        let bytes = wav_bytes(2, 22_050, &[16384, -16384, 0, 8192]);
        let audio = decode(bytes, Some("wav")).unwrap();

        assert_eq!(audio.channels, 2);
        assert_eq!(audio.sample_rate, 22_050);
        assert_eq!(audio.frames(), 2);
        assert_relative_eq!(audio.samples[0], 0.5);
        assert_relative_eq!(audio.samples[1], -0.5);
        assert_relative_eq!(audio.samples[2], 0.0);
        assert_relative_eq!(audio.samples[3], 0.25);
    }

    #[test]
    fn test_decode_without_hint_sniffs_content() {
        let bytes = wav_bytes(1, 8_000, &[0; 800]);
        let audio = decode(bytes, None).unwrap();

        assert_eq!(audio.channels, 1);
        assert_eq!(audio.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let bytes = b"definitely not an audio file".to_vec();
        assert!(matches!(decode(bytes, Some("mp3")), Err(DecodeError::Codec(_))));
    }

    #[test]
    fn test_decode_empty_input_fails() {
        assert!(decode(Vec::new(), None).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_file(Path::new("/nonexistent/wavescope/missing.wav"));
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_spawn_load_reports_once() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_load(PathBuf::from("/nonexistent/wavescope/missing.flac"), move |r| {
            tx.send(r.is_err()).unwrap();
        });
        handle.join().unwrap();

        assert!(rx.recv().unwrap());
        assert!(rx.recv().is_err());
    }
}
