//! Session orchestration: file selection, decode completion, playback start.
//!
//! Knows nothing about windows or devices; the shell feeds it events and the
//! current time, and renders whatever `tick` returns.

use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

use crate::audio::{AudioOutput, DecodedAudio};
use crate::error::DecodeError;
use crate::frame_loop::{FrameLoop, LoopState, RefreshScheduler};
use crate::visual::{DrawCommand, Mode};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a file
    Idle,
    /// A file is being read and decoded
    Loading,
    /// Audio playing, frame loop running
    Running,
    /// Frame loop stopped
    Stopped,
}

pub struct Session<O: AudioOutput, R: Rng> {
    output: O,
    source: Option<O::Source>,
    frame_loop: FrameLoop,
    rng: R,
    loading: bool,
}

impl<O: AudioOutput, R: Rng> Session<O, R> {
    pub fn new(output: O, frame_loop: FrameLoop, rng: R) -> Self {
        Self {
            output,
            source: None,
            frame_loop,
            rng,
            loading: false,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.frame_loop.state() {
            LoopState::Running => SessionState::Running,
            LoopState::Stopped => SessionState::Stopped,
            LoopState::Idle if self.loading => SessionState::Loading,
            LoopState::Idle => SessionState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.frame_loop.mode()
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &O {
        &self.output
    }

    /// Accept a file choice; returns the path to load, if any
    pub fn select_file(&mut self, path: Option<PathBuf>) -> Option<PathBuf> {
        let Some(path) = path else {
            tracing::error!("No file selected");
            return None;
        };

        if self.state() != SessionState::Idle {
            tracing::info!("Ignoring {}: a file is already loaded", path.display());
            return None;
        }

        tracing::info!("Selected {}", path.display());
        self.loading = true;
        Some(path)
    }

    /// Handle the worker's decode result; returns true when the loop started
    pub fn on_decoded(&mut self, result: Result<DecodedAudio, DecodeError>, now: Duration) -> bool {
        self.loading = false;

        if self.frame_loop.state() != LoopState::Idle {
            tracing::debug!("Discarding decode result: loop already started");
            return false;
        }

        let audio = match result {
            Ok(audio) => audio,
            Err(err) => {
                tracing::error!("Error decoding audio data: {}", err);
                return false;
            }
        };

        tracing::info!(
            "Decoded {:.1}s @ {}Hz, {} channel(s)",
            audio.duration().as_secs_f32(),
            audio.sample_rate,
            audio.channels
        );

        match self.output.play(audio) {
            Ok(source) => {
                self.source = Some(source);
                self.frame_loop.start(now)
            }
            Err(err) => {
                tracing::error!("Failed to start playback: {}", err);
                false
            }
        }
    }

    /// Run one frame if the loop is running
    pub fn tick(
        &mut self,
        now: Duration,
        scheduler: &dyn RefreshScheduler,
    ) -> Option<&[DrawCommand]> {
        let source = self.source.as_ref()?;
        self.frame_loop.tick(now, scheduler, source, &mut self.rng)
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }
}
