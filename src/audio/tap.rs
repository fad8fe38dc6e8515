//! Time-domain tap fed by the output callback.

use std::sync::{Arc, Mutex, MutexGuard};

use super::SignalSource;

/// Convert a float sample (nominally -1..1) to the 0..255 byte scale
pub fn sample_to_byte(sample: f32) -> u8 {
    (128.0 * (1.0 + sample)).floor().clamp(0.0, 255.0) as u8
}

/// Ring buffer holding the most recent `window` mono samples
#[derive(Debug, Clone)]
pub struct TimeDomainTap {
    window: Vec<f32>,
    /// Next write position, which is also the oldest retained sample
    write_pos: usize,
}

impl TimeDomainTap {
    pub fn new(window_size: usize) -> Self {
        Self {
            window: vec![0.0; window_size.max(1)],
            write_pos: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    pub fn push(&mut self, sample: f32) {
        self.window[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.window.len();
    }

    /// Write the first `min(out.len(), window)` retained samples, oldest first
    ///
    /// Slots beyond the window are filled with silence.
    pub fn fill_bytes(&self, out: &mut [u8]) {
        let len = self.window.len();
        let (head, rest) = out.split_at_mut(out.len().min(len));
        for (k, byte) in head.iter_mut().enumerate() {
            *byte = sample_to_byte(self.window[(self.write_pos + k) % len]);
        }
        rest.fill(128);
    }
}

/// Tap shared between the audio callback (writer) and the frame loop (reader)
#[derive(Debug, Clone)]
pub struct SharedTap(Arc<Mutex<TimeDomainTap>>);

impl SharedTap {
    pub fn new(window_size: usize) -> Self {
        Self(Arc::new(Mutex::new(TimeDomainTap::new(window_size))))
    }

    /// A panic on the audio thread must not take the visuals down with it
    pub fn lock(&self) -> MutexGuard<'_, TimeDomainTap> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SignalSource for SharedTap {
    fn fill_time_domain(&self, out: &mut [u8]) {
        self.lock().fill_bytes(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_to_byte_scale() {
        assert_eq!(sample_to_byte(0.0), 128);
        assert_eq!(sample_to_byte(1.0), 255);
        assert_eq!(sample_to_byte(-1.0), 0);
        assert_eq!(sample_to_byte(0.5), 192);
        assert_eq!(sample_to_byte(-0.5), 64);
    }

    #[test]
    fn test_sample_to_byte_clamps() {
        assert_eq!(sample_to_byte(3.0), 255);
        assert_eq!(sample_to_byte(-3.0), 0);
    }

    #[test]
    fn test_fresh_tap_reads_silence() {
        let tap = TimeDomainTap::new(2048);
        let mut out = vec![0u8; 1024];
        tap.fill_bytes(&mut out);
        assert!(out.iter().all(|&b| b == 128));
    }

    #[test]
    fn test_fill_returns_oldest_first() {
        let mut tap = TimeDomainTap::new(4);
        for s in [0.5, -0.5, 1.0, -1.0, 0.0, 0.5] {
            tap.push(s);
        }
        // Retained window (oldest first): 1.0, -1.0, 0.0, 0.5
        let mut out = [0u8; 2];
        tap.fill_bytes(&mut out);
        assert_eq!(out, [255, 0]);

        let mut all = [0u8; 4];
        tap.fill_bytes(&mut all);
        assert_eq!(all, [255, 0, 128, 192]);
    }

    #[test]
    fn test_fill_pads_beyond_window() {
        let mut tap = TimeDomainTap::new(2);
        tap.push(1.0);
        tap.push(1.0);
        let mut out = [0u8; 4];
        tap.fill_bytes(&mut out);
        assert_eq!(out, [255, 255, 128, 128]);
    }

    #[test]
    fn test_shared_tap_is_a_signal_source() {
        let shared = SharedTap::new(8);
        let writer = shared.clone();
        for _ in 0..8 {
            writer.lock().push(-1.0);
        }

        let mut out = [128u8; 4];
        shared.fill_time_domain(&mut out);
        assert_eq!(out, [0; 4]);
    }
}
