//! Wavescope library - real-time waveform visualization of audio files

pub mod audio;
pub mod cli;
pub mod error;
pub mod frame_loop;
pub mod params;
pub mod rendering;
pub mod session;
pub mod visual;

#[cfg(test)]
pub(crate) mod test_utils;
