//! Test doubles shared by unit tests.

use std::cell::Cell;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::audio::{AudioOutput, DecodedAudio, SignalSource};
use crate::error::AudioError;
use crate::frame_loop::RefreshScheduler;

/// Signal source reporting the same byte for every sample
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub u8);

impl SignalSource for ConstantSource {
    fn fill_time_domain(&self, out: &mut [u8]) {
        out.fill(self.0);
    }
}

/// Counts refresh requests instead of talking to a display
#[derive(Debug, Default)]
pub struct CountingScheduler {
    count: Cell<usize>,
}

impl CountingScheduler {
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl RefreshScheduler for CountingScheduler {
    fn request_refresh(&self) {
        self.count.set(self.count.get() + 1);
    }
}

/// Audio output that never touches a device
#[derive(Debug, Default)]
pub struct FakeOutput {
    pub fail: bool,
    pub played: Vec<DecodedAudio>,
}

impl AudioOutput for FakeOutput {
    type Source = ConstantSource;

    fn play(&mut self, audio: DecodedAudio) -> Result<ConstantSource, AudioError> {
        if self.fail {
            return Err(AudioError::NoDevice);
        }
        self.played.push(audio);
        Ok(ConstantSource(128))
    }
}

/// One second of mono silence at 8 kHz
pub fn silent_audio() -> DecodedAudio {
    DecodedAudio {
        samples: vec![0.0; 8_000],
        channels: 1,
        sample_rate: 8_000,
    }
}

/// A log event captured during a test
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

/// Run `f` with a subscriber that records every event on this thread
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

/// Events at ERROR level
pub fn errors(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.level == Level::ERROR).collect()
}
