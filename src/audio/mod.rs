//! Audio decoding, playback and the time-domain tap.
//!
//! Decoding runs on a worker thread, playback runs on the device callback,
//! and the frame loop reads the tap once per tick.

pub mod decoder;
pub mod playback;
pub mod system;
pub mod tap;

pub use decoder::{decode, load_file, spawn_load, DecodedAudio};
pub use playback::PlaybackCursor;
pub use system::{CpalOutput, PlaybackHandle};
pub use tap::{sample_to_byte, SharedTap, TimeDomainTap};

use crate::error::AudioError;

/// Live time-domain sample tap
pub trait SignalSource {
    /// Overwrite `out` with the current snapshot (unsigned bytes, 128 = silence)
    fn fill_time_domain(&self, out: &mut [u8]);
}

/// Something that can start playing decoded audio and expose its tap
pub trait AudioOutput {
    type Source: SignalSource;

    /// Start playback immediately and return the tap on what is playing
    fn play(&mut self, audio: DecodedAudio) -> Result<Self::Source, AudioError>;
}
