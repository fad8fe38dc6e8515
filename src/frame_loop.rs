//! Per-refresh frame loop with an explicit start/stop lifecycle.

use rand::Rng;
use std::time::Duration;

use crate::audio::SignalSource;
use crate::visual::{Color, DrawCommand, Mode, RenderSelector, SurfaceSize};

/// Asks the display for one more refresh callback
pub trait RefreshScheduler {
    fn request_refresh(&self);
}

impl RefreshScheduler for winit::window::Window {
    fn request_refresh(&self) {
        self.request_redraw();
    }
}

/// Frame loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No audio yet, nothing scheduled
    Idle,
    /// Rescheduling itself every refresh
    Running,
    /// Stopped explicitly; never restarts
    Stopped,
}

/// Samples the signal, clears the surface and draws the selected routine
pub struct FrameLoop {
    state: LoopState,
    selector: RenderSelector,
    surface: SurfaceSize,
    background: Color,
    /// Reused in place every tick
    snapshot: Vec<u8>,
    commands: Vec<DrawCommand>,
}

impl FrameLoop {
    pub fn new(
        selector: RenderSelector,
        snapshot_len: usize,
        surface: SurfaceSize,
        background: Color,
    ) -> Self {
        Self {
            state: LoopState::Idle,
            selector,
            surface,
            background,
            snapshot: vec![128; snapshot_len],
            commands: Vec::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Idle -> Running; returns false if the loop was not idle
    pub fn start(&mut self, now: Duration) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.selector.start(now);
        self.state = LoopState::Running;
        true
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
        }
    }

    /// Active extended-variant mode, if any
    pub fn mode(&self) -> Option<Mode> {
        self.selector.mode()
    }

    /// Most recent snapshot
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    /// Run one frame; returns the commands to render, or `None` when not running
    pub fn tick<S, R>(
        &mut self,
        now: Duration,
        scheduler: &dyn RefreshScheduler,
        source: &S,
        rng: &mut R,
    ) -> Option<&[DrawCommand]>
    where
        S: SignalSource + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.is_running() {
            return None;
        }

        scheduler.request_refresh();
        source.fill_time_domain(&mut self.snapshot);

        self.commands.clear();
        self.commands.push(DrawCommand::Clear(self.background));
        self.selector
            .select(now)
            .draw(&self.snapshot, self.surface, rng, &mut self.commands);

        Some(&self.commands)
    }
}
