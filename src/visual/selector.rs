//! Routine selection: a single routine, or timed rotation among several.

use std::time::Duration;

use super::{AbstractDots, Kaleidoscope, Routine, Waveform};
use crate::params::{ModeRotation, RadialStyle, Variant, WaveformStyle};

/// Visualization modes of the extended variant, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Waveform,
    Kaleidoscope,
    Abstract,
}

impl Mode {
    pub const ROTATION: [Mode; 3] = [Mode::Waveform, Mode::Kaleidoscope, Mode::Abstract];
}

/// Mode index plus the time of the last switch
///
/// Checked once per tick: when at least `interval` has passed since the last
/// switch the index advances by one (wrapping) and the switch time becomes
/// the tick time.
#[derive(Debug, Clone)]
pub struct ModeClock {
    index: usize,
    count: usize,
    last_switch: Duration,
    interval: Duration,
}

impl ModeClock {
    pub fn new(count: usize, interval: Duration) -> Self {
        Self {
            index: 0,
            count: count.max(1),
            last_switch: Duration::ZERO,
            interval,
        }
    }

    /// Restart timing from `now` without changing the index
    pub fn reset(&mut self, now: Duration) {
        self.last_switch = now;
    }

    /// Returns true when this call switched modes
    pub fn advance(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_switch) < self.interval {
            return false;
        }
        self.index = (self.index + 1) % self.count;
        self.last_switch = now;
        true
    }

    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub(crate) fn last_switch(&self) -> Duration {
        self.last_switch
    }
}

/// Chooses the routine that draws the current frame
#[derive(Debug, Clone)]
pub enum RenderSelector {
    Single(Routine),
    Rotating {
        routines: Vec<(Mode, Routine)>,
        clock: ModeClock,
    },
}

impl RenderSelector {
    /// Build the selector for a variant
    pub fn for_variant(
        variant: Variant,
        waveform: WaveformStyle,
        radial: RadialStyle,
        rotation: ModeRotation,
    ) -> Self {
        match variant {
            Variant::Simple => Self::Single(Routine::Waveform(Waveform::randomized(waveform))),
            Variant::Extended => {
                let routines: Vec<(Mode, Routine)> = Mode::ROTATION
                    .iter()
                    .map(|&mode| {
                        let routine = match mode {
                            Mode::Waveform => Routine::Waveform(Waveform::fixed(waveform.clone())),
                            Mode::Kaleidoscope => {
                                Routine::Kaleidoscope(Kaleidoscope::new(radial.clone()))
                            }
                            Mode::Abstract => Routine::Abstract(AbstractDots::new(radial.clone())),
                        };
                        (mode, routine)
                    })
                    .collect();
                let clock = ModeClock::new(routines.len(), rotation.switch_interval);
                Self::Rotating { routines, clock }
            }
        }
    }

    /// Called once when the frame loop starts
    pub fn start(&mut self, now: Duration) {
        if let Self::Rotating { clock, .. } = self {
            clock.reset(now);
        }
    }

    /// Advance rotation timing and return the routine for this tick
    pub fn select(&mut self, now: Duration) -> &Routine {
        match self {
            Self::Single(routine) => routine,
            Self::Rotating { routines, clock } => {
                if clock.advance(now) {
                    tracing::info!(mode = ?routines[clock.index()].0, "Visualization mode switched");
                }
                &routines[clock.index()].1
            }
        }
    }

    /// Active mode (`None` for a single-routine selector)
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::Single(_) => None,
            Self::Rotating { routines, clock } => Some(routines[clock.index()].0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn extended() -> RenderSelector {
        RenderSelector::for_variant(
            Variant::Extended,
            WaveformStyle::default(),
            RadialStyle::default(),
            ModeRotation::default(),
        )
    }

    #[test]
    fn test_clock_holds_before_interval() {
        let mut clock = ModeClock::new(3, ms(5000));
        clock.reset(ms(1000));

        assert!(!clock.advance(ms(1000)));
        assert!(!clock.advance(ms(5999)));
        assert_eq!(clock.index(), 0);
        assert_eq!(clock.last_switch(), ms(1000));
    }

    #[test]
    fn test_clock_advances_at_interval_and_resets() {
        let mut clock = ModeClock::new(3, ms(5000));

        assert!(clock.advance(ms(5000)));
        assert_eq!(clock.index(), 1);
        assert_eq!(clock.last_switch(), ms(5000));

        // Timestamp reset means the next switch needs a full interval again
        assert!(!clock.advance(ms(9999)));
        assert!(clock.advance(ms(10_000)));
        assert_eq!(clock.index(), 2);
    }

    #[test]
    fn test_clock_wraps() {
        let mut clock = ModeClock::new(3, ms(10));
        for t in 1..=3 {
            assert!(clock.advance(ms(t * 10)));
        }
        assert_eq!(clock.index(), 0);
    }

    #[test]
    fn test_clock_advances_once_per_check() {
        // A long stall still moves exactly one mode
        let mut clock = ModeClock::new(3, ms(5000));
        assert!(clock.advance(ms(60_000)));
        assert_eq!(clock.index(), 1);
    }

    #[test]
    fn test_simple_variant_has_no_mode() {
        let mut selector = RenderSelector::for_variant(
            Variant::Simple,
            WaveformStyle::default(),
            RadialStyle::default(),
            ModeRotation::default(),
        );
        assert_eq!(selector.mode(), None);
        assert!(matches!(selector.select(ms(100_000)), Routine::Waveform(_)));
    }

    #[test]
    fn test_extended_rotation_order() {
        let mut selector = extended();
        selector.start(ms(0));

        assert!(matches!(selector.select(ms(16)), Routine::Waveform(_)));
        assert!(matches!(selector.select(ms(5000)), Routine::Kaleidoscope(_)));
        assert!(matches!(selector.select(ms(10_000)), Routine::Abstract(_)));
        assert!(matches!(selector.select(ms(15_000)), Routine::Waveform(_)));
    }

    #[test]
    fn test_start_resets_switch_time() {
        let mut selector = extended();
        selector.start(ms(4000));

        selector.select(ms(8999));
        assert_eq!(selector.mode(), Some(Mode::Waveform));
        selector.select(ms(9000));
        assert_eq!(selector.mode(), Some(Mode::Kaleidoscope));
    }
}
