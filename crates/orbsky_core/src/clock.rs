//! Cycling animation clock
//!
//! Drives the `time` shader uniform. The clock advances by a fixed step every
//! frame and wraps back to zero once it would reach `period`.
//!
//! The value is derived from an integer tick index rather than accumulated,
//! so `0.1` ten times lands exactly on the wrap instead of drifting past it.

/// Fixed-step clock that wraps from `period` back to zero
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClock {
    step: f32,
    period: f32,
    /// Number of distinct values before wrapping
    len: u32,
    tick: u32,
    paused: bool,
}

impl AnimationClock {
    /// Create a clock advancing by `step` and wrapping at `period`
    pub fn new(step: f32, period: f32) -> Result<Self, ClockError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ClockError::InvalidStep(step));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(ClockError::InvalidPeriod(period));
        }

        // Round away tiny float error so 1.0 / 0.1 gives 10, not 11
        let ratio = period / step;
        let rounded = ratio.round();
        let len = if (ratio - rounded).abs() < 1e-4 { rounded } else { ratio.ceil() };
        let len = len.clamp(1.0, u32::MAX as f32) as u32;

        Ok(Self {
            step,
            period,
            len,
            tick: 0,
            paused: false,
        })
    }

    /// Builder: start paused or running
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Current value without advancing
    pub fn value(&self) -> f32 {
        self.tick as f32 * self.step
    }

    /// Return the current value, then advance one step (unless paused)
    pub fn tick(&mut self) -> f32 {
        let value = self.value();
        if !self.paused {
            self.tick = (self.tick + 1) % self.len;
        }
        value
    }

    /// Restart from zero
    pub fn reset(&mut self) {
        self.tick = 0;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the paused state, returning the new state
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Number of distinct values in one cycle
    pub fn cycle_len(&self) -> u32 {
        self.len
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            step: 0.1,
            period: 1.0,
            len: 10,
            tick: 0,
            paused: false,
        }
    }
}

/// Invalid clock parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ClockError {
    /// Step must be finite and positive
    InvalidStep(f32),
    /// Period must be finite and positive
    InvalidPeriod(f32),
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::InvalidStep(v) => write!(f, "Invalid clock step: {}", v),
            ClockError::InvalidPeriod(v) => write!(f, "Invalid clock period: {}", v),
        }
    }
}

impl std::error::Error for ClockError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence_wraps_at_one() {
        let mut clock = AnimationClock::default();
        let values: Vec<f32> = (0..12).map(|_| clock.tick()).collect();

        assert_eq!(values[0], 0.0);
        assert!((values[9] - 0.9).abs() < 1e-6);
        // Wrapped: never reaches 1.0
        assert_eq!(values[10], 0.0);
        assert!((values[11] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_values_stay_in_range() {
        let mut clock = AnimationClock::new(0.1, 1.0).unwrap();
        for _ in 0..10_000 {
            let v = clock.tick();
            assert!((0.0..1.0).contains(&v), "value out of range: {}", v);
        }
    }

    #[test]
    fn test_new_matches_default() {
        assert_eq!(AnimationClock::new(0.1, 1.0).unwrap(), AnimationClock::default());
    }

    #[test]
    fn test_uneven_period_rounds_up() {
        // 0.0, 0.3, 0.6, 0.9 then wrap
        let clock = AnimationClock::new(0.3, 1.0).unwrap();
        assert_eq!(clock.cycle_len(), 4);
    }

    #[test]
    fn test_step_larger_than_period() {
        let mut clock = AnimationClock::new(2.0, 1.0).unwrap();
        assert_eq!(clock.cycle_len(), 1);
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(AnimationClock::new(0.0, 1.0), Err(ClockError::InvalidStep(0.0)));
        assert_eq!(AnimationClock::new(0.1, -1.0), Err(ClockError::InvalidPeriod(-1.0)));
        assert!(AnimationClock::new(f32::NAN, 1.0).is_err());
        assert!(AnimationClock::new(0.1, f32::INFINITY).is_err());
    }

    #[test]
    fn test_paused_holds_value() {
        let mut clock = AnimationClock::default();
        clock.tick();
        clock.tick();
        assert!(clock.toggle_paused());
        let held = clock.value();
        for _ in 0..5 {
            assert_eq!(clock.tick(), held);
        }
        assert!(!clock.toggle_paused());
        assert_eq!(clock.tick(), held);
        assert!(clock.value() > held);
    }

    #[test]
    fn test_reset() {
        let mut clock = AnimationClock::default();
        clock.tick();
        clock.tick();
        clock.reset();
        assert_eq!(clock.value(), 0.0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", ClockError::InvalidStep(0.0)),
            "Invalid clock step: 0"
        );
    }
}
